// Response validator: separates transport failures from upstream API errors

use crate::errors::ExecutionError;
use crate::models::HttpOutcome;
use serde_json::Value;

/// Longest body excerpt carried in a transport error
const BODY_EXCERPT_LEN: usize = 256;

/// Accept the outcome only if it holds a well-formed, error-free body
#[tracing::instrument(skip_all)]
pub fn validate_response(outcome: HttpOutcome) -> Result<Value, ExecutionError> {
    let (status, body) = match outcome {
        HttpOutcome::Transport(error) => {
            tracing::error!(error = %error, "HTTP request failed");
            return Err(ExecutionError::TransportError(error));
        }
        HttpOutcome::Response { status, body } => (status, body),
    };

    let parsed = serde_json::from_str::<Value>(&body);

    if !(200..300).contains(&status) {
        let detail = parsed
            .as_ref()
            .ok()
            .and_then(upstream_error_message)
            .unwrap_or_else(|| excerpt(&body));
        tracing::error!(status_code = status, detail = %detail, "HTTP request returned error status");
        return Err(ExecutionError::TransportError(format!(
            "status {}: {}",
            status, detail
        )));
    }

    let data = parsed.map_err(|e| {
        ExecutionError::TransportError(format!("failed to decode response body as JSON: {}", e))
    })?;

    if let Some(message) = upstream_error_message(&data) {
        tracing::error!(message = %message, "Upstream API reported an error");
        return Err(ExecutionError::UpstreamError(message));
    }

    Ok(data)
}

/// Message of an API-level error marker, if the body carries one.
///
/// Recognized markers:
/// - `{"Response": "Error", "Message": "..."}`
/// - `{"error": {"message": "..."}}` or `{"error": "..."}`
pub fn upstream_error_message(data: &Value) -> Option<String> {
    if data.get("Response").and_then(Value::as_str) == Some("Error") {
        let message = data
            .get("Message")
            .and_then(Value::as_str)
            .unwrap_or("no message provided");
        return Some(message.to_string());
    }

    match data.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(message) => Some(message.clone()),
        Value::Object(error) => Some(
            error
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| Value::Object(error.clone()).to_string()),
        ),
        other => Some(other.to_string()),
    }
}

fn excerpt(body: &str) -> String {
    if body.len() <= BODY_EXCERPT_LEN {
        return body.to_string();
    }
    let mut end = BODY_EXCERPT_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
