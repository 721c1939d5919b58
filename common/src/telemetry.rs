// Telemetry module for structured logging and metrics

use anyhow::Result;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize structured logging.
///
/// Logs go to stderr: stdout is reserved for the encoded result. `RUST_LOG`
/// takes precedence over `log_level` when set.
pub fn init_logging(log_level: &str, json: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(|e| anyhow::anyhow!("Failed to create env filter: {}", e))?;

    let layer = if json {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed()
    } else {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {}", e))?;

    tracing::debug!(log_level = log_level, json = json, "Logging initialized");

    Ok(())
}

/// Register metric descriptions with whatever recorder the host installed
pub fn describe_metrics() {
    describe_counter!(
        "data_request_success_total",
        "Total number of data requests that produced an encoded result"
    );
    describe_counter!(
        "data_request_failed_total",
        "Total number of failed data requests"
    );
    describe_histogram!(
        "data_request_duration_seconds",
        "Duration of data request executions in seconds"
    );
}

#[inline]
pub fn record_request_success() {
    counter!("data_request_success_total").increment(1);
}

#[inline]
pub fn record_request_failure(reason: &'static str) {
    counter!("data_request_failed_total", "reason" => reason).increment(1);
}

#[inline]
pub fn record_request_duration(duration_seconds: f64) {
    histogram!("data_request_duration_seconds").record(duration_seconds);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_installs_subscriber_once() {
        // The first call may lose to another test; either way one is now installed
        let _ = init_logging("info", false);
        assert!(init_logging("debug", true).is_err());
    }

    #[test]
    fn test_metrics_recording() {
        // No recorder installed: calls must be no-ops, not panics
        describe_metrics();
        record_request_success();
        record_request_failure("transport_error");
        record_request_duration(0.25);
    }
}
