use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub watsonx: WatsonxConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatsonxConfig {
    pub api_key: String,
    pub base_url: String,
    pub project_id: String,
    #[serde(default = "default_model_id")]
    pub model_id: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

impl WatsonxConfig {
    pub fn new(api_key: String, base_url: String, project_id: String) -> Self {
        Self {
            api_key,
            base_url,
            project_id,
            model_id: default_model_id(),
            token_url: default_token_url(),
            api_version: default_api_version(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logs: LogsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LogsConfig {
    /// Builds the tracing filter for the configured level, rejecting
    /// anything that is not a plain level name.
    pub fn tracing_filter(&self) -> Result<tracing_subscriber::EnvFilter> {
        let level: tracing_subscriber::filter::LevelFilter =
            self.level.parse().map_err(|_| {
                Error::config(format!(
                    "invalid log level {:?}, valid levels: error, warn, info, debug, trace",
                    self.level
                ))
            })?;
        Ok(tracing_subscriber::EnvFilter::new(level.to_string()))
    }
}

fn default_model_id() -> String {
    "ibm/granite-13b-instruct-v2".to_string()
}

fn default_token_url() -> String {
    "https://iam.cloud.ibm.com/identity/token".to_string()
}

fn default_api_version() -> String {
    "2024-05-01".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}
