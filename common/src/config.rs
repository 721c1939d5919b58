// Configuration management with layered configuration (file, env)

use crate::credential::DEFAULT_PLACEHOLDER;
use crate::encoding::{ByteOrder, ResultEncoder};
use crate::extract::FieldPath;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings structure containing all configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub request: RequestConfig,
    pub extraction: ExtractionConfig,
    pub encoding: EncodingConfig,
    pub credentials: CredentialConfig,
    pub observability: ObservabilityConfig,
}

/// Fixed parameters of the outbound request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    pub endpoint: String,
    pub id_param: String,
    pub key_param: String,
    pub fields_param: String,
    pub fields: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Dotted path with bracketed indices, e.g. `items[0].statistics.viewCount`
    pub field_path: String,
}

/// Must match what the consuming contract decodes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodingConfig {
    pub width_bytes: usize,
    #[serde(default)]
    pub byte_order: ByteOrder,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialConfig {
    #[serde(default = "default_placeholders")]
    pub placeholders: Vec<String>,
}

fn default_placeholders() -> Vec<String> {
    vec![DEFAULT_PLACEHOLDER.to_string()]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
    #[serde(default)]
    pub json_logs: bool,
}

impl Settings {
    /// Load configuration with layered precedence: defaults → file → env
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("config")
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let defaults = Config::try_from(&Settings::default())?;

        let builder = Config::builder()
            // Start with built-in defaults
            .add_source(defaults)
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Add local configuration (not committed to git)
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), String> {
        let endpoint = &self.request.endpoint;
        if endpoint.is_empty() {
            return Err("Request endpoint cannot be empty".to_string());
        }
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(format!("Request endpoint must be an http(s) URL: {}", endpoint));
        }
        if self.request.id_param.is_empty()
            || self.request.key_param.is_empty()
            || self.request.fields_param.is_empty()
        {
            return Err("Request parameter names cannot be empty".to_string());
        }
        if self.request.timeout_seconds == 0 {
            return Err("Request timeout_seconds must be greater than 0".to_string());
        }

        FieldPath::parse(&self.extraction.field_path)
            .map_err(|e| format!("Invalid extraction field_path: {}", e))?;

        ResultEncoder::new(self.encoding.width_bytes, self.encoding.byte_order)
            .map_err(|e| e.to_string())?;

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            request: RequestConfig::default(),
            extraction: ExtractionConfig {
                field_path: "items[0].statistics.viewCount".to_string(),
            },
            encoding: EncodingConfig {
                width_bytes: 32,
                byte_order: ByteOrder::Big,
            },
            credentials: CredentialConfig {
                placeholders: default_placeholders(),
            },
            observability: ObservabilityConfig {
                log_level: "info".to_string(),
                json_logs: false,
            },
        }
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://www.googleapis.com/youtube/v3/videos".to_string(),
            id_param: "id".to_string(),
            key_param: "key".to_string(),
            fields_param: "part".to_string(),
            fields: "statistics".to_string(),
            timeout_seconds: 9,
        }
    }
}
