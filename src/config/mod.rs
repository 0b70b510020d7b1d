mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    debug!("Loading configuration from: {}", config_path);

    let mut config = match tokio::fs::read_to_string(&config_path).await {
        Ok(config_str) => serde_yaml::from_str(&config_str)?,
        // No config file: the three secrets can come entirely from the environment
        Err(_) => from_env()?,
    };

    apply_env_overrides(&mut config);

    Ok(config)
}

fn from_env() -> Result<Config> {
    let api_key = env::var("API_KEY")
        .map_err(|_| Error::config("API_KEY not set and no config file found"))?;
    let base_url = env::var("WML_URL")
        .map_err(|_| Error::config("WML_URL not set and no config file found"))?;
    let project_id = env::var("PROJECT_ID")
        .map_err(|_| Error::config("PROJECT_ID not set and no config file found"))?;

    Ok(Config {
        watsonx: WatsonxConfig::new(api_key, base_url, project_id),
        server: ServerConfig::default(),
    })
}

/// Environment variables win over anything the config file provided.
fn apply_env_overrides(config: &mut Config) {
    if let Ok(api_key) = env::var("API_KEY") {
        config.watsonx.api_key = api_key;
    }
    if let Ok(base_url) = env::var("WML_URL") {
        config.watsonx.base_url = base_url;
    }
    if let Ok(project_id) = env::var("PROJECT_ID") {
        config.watsonx.project_id = project_id;
    }
}
