use anyhow::{Context, Result};
use healthai_rust::{config, server};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration first; the subscriber needs the configured level.
    let config = config::load()
        .await
        .context("failed to load configuration")?;

    // RUST_LOG wins over the configured level.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| config.server.logs.tracing_filter())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .init();

    info!(
        host = %config.server.host,
        port = config.server.port,
        model = %config.watsonx.model_id,
        "Starting HealthAI server"
    );

    server::run(config).await?;
    Ok(())
}
