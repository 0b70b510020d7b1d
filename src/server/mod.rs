pub mod handlers;
pub mod types;

use crate::{Result, config::Config, history::HistoryStore, llm::WatsonxClient};
use axum::{
    Router,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub fn router(state: handlers::AppState) -> Router {
    Router::new()
        .route("/chat", post(handlers::chat))
        .route("/chat/:session_id", get(handlers::chat_history))
        .route("/predict", post(handlers::predict))
        .route("/treatment", post(handlers::treatment))
        .route("/analytics", post(handlers::analytics_upload))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let gateway = WatsonxClient::new(config.watsonx.clone());

    let app_state = handlers::AppState {
        gateway: Arc::new(gateway),
        history: Arc::new(HistoryStore::new()),
    };

    let app = router(app_state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
