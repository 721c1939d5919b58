// Error handling framework
// Every failure is terminal for the job invocation; nothing here is retried.

use thiserror::Error;

/// Data request execution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("API credential is missing or still set to its placeholder value")]
    MissingCredential,

    #[error("Missing request argument: {0}")]
    MissingArgument(String),

    #[error("HTTP request failed: {0}")]
    TransportError(String),

    #[error("Upstream API error: {0}")]
    UpstreamError(String),

    #[error("Missing field in response: {0}")]
    MissingField(String),

    #[error("Malformed value: {0}")]
    MalformedValue(String),

    #[error("Value overflow: {0}")]
    Overflow(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl ExecutionError {
    /// Stable label for metrics and structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            ExecutionError::MissingCredential => "missing_credential",
            ExecutionError::MissingArgument(_) => "missing_argument",
            ExecutionError::TransportError(_) => "transport_error",
            ExecutionError::UpstreamError(_) => "upstream_error",
            ExecutionError::MissingField(_) => "missing_field",
            ExecutionError::MalformedValue(_) => "malformed_value",
            ExecutionError::Overflow(_) => "overflow",
            ExecutionError::InvalidConfiguration(_) => "invalid_configuration",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_display_carries_message() {
        let err = ExecutionError::UpstreamError("API key not valid".to_string());
        assert!(err.to_string().contains("API key not valid"));
    }

    #[test]
    fn test_missing_credential_display_has_no_secret() {
        let err = ExecutionError::MissingCredential;
        assert!(err.to_string().contains("credential"));
    }

    #[test]
    fn test_kind_labels_are_distinct() {
        let errors = [
            ExecutionError::MissingCredential,
            ExecutionError::MissingArgument(String::new()),
            ExecutionError::TransportError(String::new()),
            ExecutionError::UpstreamError(String::new()),
            ExecutionError::MissingField(String::new()),
            ExecutionError::MalformedValue(String::new()),
            ExecutionError::Overflow(String::new()),
            ExecutionError::InvalidConfiguration(String::new()),
        ];
        let mut kinds: Vec<_> = errors.iter().map(|e| e.kind()).collect();
        kinds.sort();
        kinds.dedup();
        assert_eq!(kinds.len(), errors.len());
    }
}
