use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::interface::{GenerateContentRequest, GenerateContentResponse, TextGenerator};
use crate::config::GenerationConfig;
use crate::config_manager::ApiKey;
use crate::error::{ConfigurationError, GenerationError};

/// Gemini `generateContent` over REST.
pub struct GeminiLLM {
    client: Client,
    base_url: String,
    model: String,
    api_key: ApiKey,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl GeminiLLM {
    pub fn new(config: &GenerationConfig, api_key: ApiKey) -> Result<Self, ConfigurationError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ConfigurationError::HttpClient(e.to_string()))?;

        let model = config.model.trim_start_matches("models/").to_string();
        let base_url = config.base_url.trim_end_matches('/').to_string();
        info!("Initialized GeminiLLM: model={}, base_url={}", model, base_url);

        Ok(Self {
            client,
            base_url,
            model,
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl TextGenerator for GeminiLLM {
    async fn generate_content(&self, prompt: &str) -> Result<GenerateContentResponse, GenerationError> {
        let url = self.endpoint();
        debug!("Sending generateContent request: model={}, prompt_chars={}", self.model, prompt.chars().count());

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose())
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorEnvelope>()
                .await
                .map(|envelope| envelope.error.message)
                .unwrap_or_default();
            warn!("Model endpoint returned {}: {}", status, detail);
            return Err(GenerationError::Transport(if detail.is_empty() {
                status.to_string()
            } else {
                format!("{}: {}", status, detail)
            }));
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| GenerationError::Transport(format!("invalid response payload: {}", e)))
    }
}
