// Worker binary entry point
// Runs exactly one data request and prints the encoded result on stdout.

use anyhow::Result;
use clap::Parser;
use common::config::Settings;
use common::executor::http::ReqwestTransport;
use common::models::{Credential, DataRequest};
use common::pipeline::DataRequestJob;
use common::telemetry;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "worker", about = "Fetch a value from the configured API and encode it for on-chain delivery")]
struct Cli {
    /// Request arguments; the first one identifies the resource to query
    #[arg(required = true)]
    args: Vec<String>,

    /// API key used for the request
    #[arg(long, env = "YT_API_KEY", hide_env_values = true, default_value = "")]
    api_key: String,

    /// Directory holding default.toml / local.toml
    #[arg(long, default_value = "config")]
    config_dir: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load_from_path(&cli.config_dir)
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    telemetry::init_logging(
        &settings.observability.log_level,
        settings.observability.json_logs,
    )?;
    telemetry::describe_metrics();

    let transport = ReqwestTransport::new(settings.request.timeout_seconds).map_err(|e| {
        error!(error = %e, "Failed to initialize HTTP transport");
        anyhow::anyhow!("HTTP transport initialization error: {}", e)
    })?;

    let job = DataRequestJob::from_settings(&settings, Arc::new(transport)).map_err(|e| {
        error!(error = %e, "Invalid configuration");
        anyhow::anyhow!("{}", e)
    })?;

    let credential = Credential::new(cli.api_key);
    let request = DataRequest::new(cli.args);

    info!("Starting data request");
    let report = job.run(&request, &credential).await;

    match report.result {
        Ok(encoded) => {
            println!("{}", encoded.to_hex());
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("{}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_args_and_key() {
        let cli = Cli::try_parse_from(["worker", "dQw4w9WgXcQ", "--api-key", "validkey"]).unwrap();
        assert_eq!(cli.args, vec!["dQw4w9WgXcQ".to_string()]);
        assert_eq!(cli.api_key, "validkey");
        assert_eq!(cli.config_dir, PathBuf::from("config"));
    }

    #[test]
    fn test_cli_requires_an_argument() {
        assert!(Cli::try_parse_from(["worker", "--api-key", "validkey"]).is_err());
    }
}
