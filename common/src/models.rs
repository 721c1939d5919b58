use crate::encoding::EncodedResult;
use crate::errors::ExecutionError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use zeroize::Zeroize;

// ============================================================================
// Job Input Models
// ============================================================================

/// Arguments supplied by the host for one job invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRequest {
    pub args: Vec<String>,
}

impl DataRequest {
    pub fn new(args: Vec<String>) -> Self {
        Self { args }
    }

    /// Convenience constructor for the common single-argument request
    pub fn single(argument: impl Into<String>) -> Self {
        Self {
            args: vec![argument.into()],
        }
    }

    /// The argument the request is made for (`args[0]`), exactly as supplied
    pub fn primary_argument(&self) -> Result<&str, ExecutionError> {
        match self.args.first().map(String::as_str) {
            Some(arg) if !arg.trim().is_empty() => Ok(arg),
            Some(_) => Err(ExecutionError::MissingArgument(
                "first argument is blank".to_string(),
            )),
            None => Err(ExecutionError::MissingArgument(
                "no arguments supplied".to_string(),
            )),
        }
    }
}

/// API credential injected by the host.
///
/// Never printed: `Debug` is redacted and the backing memory is wiped on drop.
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Access the raw secret. Only the request builder should need this.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

impl Drop for Credential {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

// ============================================================================
// HTTP Models
// ============================================================================

/// Value of a single query parameter
#[derive(Clone)]
pub enum QueryValue {
    Plain(String),
    Secret(Credential),
}

impl QueryValue {
    pub fn as_str(&self) -> &str {
        match self {
            QueryValue::Plain(value) => value,
            QueryValue::Secret(credential) => credential.expose(),
        }
    }
}

impl fmt::Debug for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Plain(value) => write!(f, "{:?}", value),
            QueryValue::Secret(_) => f.write_str("[REDACTED]"),
        }
    }
}

/// Inert descriptor of the single outbound GET request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub query: Vec<(String, QueryValue)>,
}

impl HttpRequest {
    /// Query parameters in order, secrets exposed, ready for the wire
    pub fn query_pairs(&self) -> Vec<(&str, &str)> {
        self.query
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect()
    }

    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Result of the single outbound call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpOutcome {
    /// No usable response was received
    Transport(String),
    Response { status: u16, body: String },
}

impl HttpOutcome {
    pub fn ok(body: impl Into<String>) -> Self {
        HttpOutcome::Response {
            status: 200,
            body: body.into(),
        }
    }
}

// ============================================================================
// Execution Models
// ============================================================================

/// Pipeline stages in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Start,
    CredentialChecked,
    RequestSent,
    ResponseValidated,
    ValueExtracted,
    Encoded,
}

impl PipelineStage {
    /// The stage that follows this one, `None` once encoded
    pub fn next(self) -> Option<PipelineStage> {
        match self {
            PipelineStage::Start => Some(PipelineStage::CredentialChecked),
            PipelineStage::CredentialChecked => Some(PipelineStage::RequestSent),
            PipelineStage::RequestSent => Some(PipelineStage::ResponseValidated),
            PipelineStage::ResponseValidated => Some(PipelineStage::ValueExtracted),
            PipelineStage::ValueExtracted => Some(PipelineStage::Encoded),
            PipelineStage::Encoded => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == PipelineStage::Encoded
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Start => "start",
            PipelineStage::CredentialChecked => "credential_checked",
            PipelineStage::RequestSent => "request_sent",
            PipelineStage::ResponseValidated => "response_validated",
            PipelineStage::ValueExtracted => "value_extracted",
            PipelineStage::Encoded => "encoded",
        };
        f.write_str(name)
    }
}

/// Record of one job invocation
#[derive(Debug, Clone)]
pub struct JobReport {
    pub execution_id: Uuid,
    /// Last stage completed successfully
    pub stage: PipelineStage,
    pub result: Result<EncodedResult, ExecutionError>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl JobReport {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn duration_seconds(&self) -> f64 {
        (self.completed_at - self.started_at)
            .num_microseconds()
            .map(|us| us as f64 / 1_000_000.0)
            .unwrap_or_default()
    }
}
