// HTTP transport implementation backed by reqwest

use crate::errors::ExecutionError;
use crate::executor::HttpTransport;
use crate::models::{HttpOutcome, HttpRequest};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// ReqwestTransport sends the job's request over the network
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a new ReqwestTransport with the specified timeout
    pub fn new(timeout_seconds: u64) -> Result<Self, ExecutionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| {
                ExecutionError::TransportError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[tracing::instrument(skip_all, fields(url = %request.url))]
    async fn send(&self, request: &HttpRequest) -> HttpOutcome {
        tracing::info!("Executing HTTP GET request");

        let response = match self
            .client
            .get(&request.url)
            .query(&request.query_pairs())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                // reqwest errors embed the full URL, which carries the credential
                return HttpOutcome::Transport(describe_error(&e.without_url()));
            }
        };

        let status = response.status();
        tracing::info!(status_code = status.as_u16(), "HTTP response received");

        match response.text().await {
            Ok(body) => {
                tracing::debug!(body_len = body.len(), "Read response body");
                HttpOutcome::Response {
                    status: status.as_u16(),
                    body,
                }
            }
            Err(e) => HttpOutcome::Transport(format!(
                "failed to read response body: {}",
                describe_error(&e.without_url())
            )),
        }
    }
}

fn describe_error(e: &reqwest::Error) -> String {
    let mut message = if e.is_timeout() {
        format!("request timed out: {}", e)
    } else if e.is_connect() {
        format!("connection failed: {}", e)
    } else {
        e.to_string()
    };

    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
