// Request builder: turns the argument and credential into the outbound request

use crate::config::RequestConfig;
use crate::models::{Credential, HttpRequest, QueryValue};

/// Build the single GET request for `argument`.
///
/// Parameter order is fixed: identifier, credential, fields selector.
pub fn build_request(config: &RequestConfig, argument: &str, credential: &Credential) -> HttpRequest {
    HttpRequest {
        url: config.endpoint.clone(),
        query: vec![
            (
                config.id_param.clone(),
                QueryValue::Plain(argument.to_string()),
            ),
            (
                config.key_param.clone(),
                QueryValue::Secret(credential.clone()),
            ),
            (
                config.fields_param.clone(),
                QueryValue::Plain(config.fields.clone()),
            ),
        ],
    }
}
