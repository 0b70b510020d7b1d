use crate::analytics::{ChartSpec, VitalsSummary};
use crate::history::Message;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    pub input: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub output: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub session_id: String,
    pub messages: Vec<Message>,
}

#[derive(Debug, Deserialize)]
pub struct PredictionRequest {
    pub symptoms: String,
}

#[derive(Debug, Deserialize)]
pub struct TreatmentRequest {
    pub condition: String,
}

#[derive(Debug, Serialize)]
pub struct OutputResponse {
    pub output: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub charts: Vec<ChartSpec>,
    pub summary: VitalsSummary,
    pub insights: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
