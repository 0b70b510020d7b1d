use super::types::*;
use crate::{Error, Result, config::WatsonxConfig};
use async_trait::async_trait;
use tracing::{debug, info, warn};

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Lenient surface for the presentation layer: failures degrade to a
    /// display string prefixed with "Error:" instead of propagating.
    async fn generate_or_report(&self, prompt: &str) -> String {
        match self.generate(prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Generation failed: {}", e);
                format!("Error: {e}")
            }
        }
    }
}

pub struct WatsonxClient {
    http: reqwest::Client,
    config: WatsonxConfig,
}

impl WatsonxClient {
    pub fn new(config: WatsonxConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Exchanges the static API key for a short-lived bearer token.
    /// A fresh token is fetched for every generation call; nothing is cached.
    async fn fetch_token(&self) -> Result<String> {
        debug!("Requesting access token from {}", self.config.token_url);

        let response = self
            .http
            .post(&self.config.token_url)
            .form(&[
                ("apikey", self.config.api_key.as_str()),
                ("grant_type", APIKEY_GRANT_TYPE),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::auth(format!(
                "token endpoint returned {}",
                response.status()
            )));
        }

        let token: TokenResponse = response.json().await?;
        debug!("Access token received");
        Ok(token.access_token)
    }

    fn generation_url(&self) -> String {
        format!(
            "{}/ml/v1/text/generation?version={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_version
        )
    }
}

#[async_trait]
impl TextGenerator for WatsonxClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        // Token failure must short-circuit before the generation endpoint
        // is contacted.
        let access_token = self.fetch_token().await?;

        let request = GenerationRequest {
            model_id: self.config.model_id.clone(),
            input: prompt.to_string(),
            parameters: GenerationParameters::default(),
            project_id: self.config.project_id.clone(),
        };

        info!("Sending prompt to model {}", request.model_id);

        let response = self
            .http
            .post(self.generation_url())
            .bearer_auth(access_token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Generation {
                status: status.as_u16(),
                body,
            });
        }

        let generation: GenerationResponse = response.json().await?;
        let result = generation
            .results
            .into_iter()
            .next()
            .ok_or_else(|| Error::llm("response contained no results"))?;

        debug!(
            "Received {} generated characters",
            result.generated_text.len()
        );
        Ok(result.generated_text)
    }
}
