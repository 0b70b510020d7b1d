use serde::{Deserialize, Serialize};

pub const APIKEY_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub model_id: String,
    pub input: String,
    pub parameters: GenerationParameters,
    pub project_id: String,
}

/// Fixed decoding parameters; every request uses the same budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationParameters {
    pub decoding_method: String,
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_new_tokens: u32,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            decoding_method: "greedy".to_string(),
            temperature: 0.7,
            top_k: 50,
            top_p: 0.95,
            max_new_tokens: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub results: Vec<GenerationResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub generated_text: String,
}
