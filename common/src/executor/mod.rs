// Executor module for the outbound call
// The transport is the pipeline's only suspension point.

pub mod http;

use crate::models::{HttpOutcome, HttpRequest};
use async_trait::async_trait;

/// HttpTransport performs the single outbound request of a job
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send the request once. Failures are reported in the outcome, never retried.
    async fn send(&self, request: &HttpRequest) -> HttpOutcome;
}
