use super::types::*;
use crate::{
    analytics,
    history::{HistoryStore, Message},
    llm::TextGenerator,
    prompts,
};
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn TextGenerator>,
    pub history: Arc<HistoryStore>,
}

fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn internal_error(message: impl std::fmt::Display) -> ApiError {
    error!("Request failed: {}", message);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: format!("Processing error: {message}"),
        }),
    )
}

pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let input = request.input.trim();
    if input.is_empty() {
        return Err(bad_request("Please enter a question before sending."));
    }

    let session_id = request
        .session_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    info!("Received chat request for session: {}", session_id);

    let output = state
        .gateway
        .generate_or_report(&prompts::chat_prompt(input))
        .await;

    state
        .history
        .save(Message::user(session_id.clone(), input.to_string()))
        .map_err(internal_error)?;
    state
        .history
        .save(Message::assistant(session_id.clone(), output.clone()))
        .map_err(internal_error)?;

    Ok(Json(ChatResponse { session_id, output }))
}

pub async fn chat_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let messages = state.history.list(&session_id).map_err(internal_error)?;
    Ok(Json(HistoryResponse {
        session_id,
        messages,
    }))
}

pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictionRequest>,
) -> Result<Json<OutputResponse>, ApiError> {
    let symptoms = request.symptoms.trim();
    if symptoms.is_empty() {
        return Err(bad_request("Please enter symptoms before predicting."));
    }

    info!("Received prediction request");

    let output = state
        .gateway
        .generate_or_report(&prompts::prediction_prompt(symptoms))
        .await;

    Ok(Json(OutputResponse { output }))
}

pub async fn treatment(
    State(state): State<AppState>,
    Json(request): Json<TreatmentRequest>,
) -> Result<Json<OutputResponse>, ApiError> {
    let condition = request.condition.trim();
    if condition.is_empty() {
        return Err(bad_request(
            "Please enter a condition before generating a plan.",
        ));
    }

    info!("Received treatment plan request");

    let output = state
        .gateway
        .generate_or_report(&prompts::treatment_prompt(condition))
        .await;

    Ok(Json(OutputResponse { output }))
}

pub async fn analytics_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyticsResponse>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("Invalid upload: {e}")))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| bad_request(format!("Invalid upload: {e}")))?;
        upload = Some((file_name, bytes.to_vec()));
        break;
    }

    let Some((file_name, bytes)) = upload else {
        return Err(bad_request(
            "Please upload a health data file (CSV or Excel).",
        ));
    };

    info!("Received analytics upload: {}", file_name);

    let records = analytics::ingest(&file_name, &bytes)
        .map_err(|e| bad_request(format!("Could not read file: {e}")))?;

    let charts = analytics::build_charts(&records);
    let summary = analytics::summarize(&records);
    let insights = state
        .gateway
        .generate_or_report(&prompts::insights_prompt(&summary.describe()))
        .await;

    Ok(Json(AnalyticsResponse {
        charts,
        summary,
        insights,
    }))
}
