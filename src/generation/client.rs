use std::sync::Arc;
use tracing::{debug, info};

use super::interface::TextGenerator;
use super::prompts::{lecture_prompt, translation_prompt};
use crate::error::GenerationError;

/// Turns user actions into prompts and extracts the first candidate's text.
/// One network round trip per call: no retries, no caching.
#[derive(Clone)]
pub struct GenerationClient {
    generator: Arc<dyn TextGenerator>,
}

impl GenerationClient {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn generate_lecture(&self, topic: &str) -> Result<String, GenerationError> {
        info!("Generating lecture on {:?}", topic);
        self.complete(&lecture_prompt(topic)).await
    }

    /// Callers reject blank text and identical languages before calling this.
    pub async fn translate(&self, text: &str, from: &str, to: &str) -> Result<String, GenerationError> {
        info!("Translating {} chars from {} to {}", text.chars().count(), from, to);
        self.complete(&translation_prompt(text, from, to)).await
    }

    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let response = self.generator.generate_content(prompt).await?;
        let text = response.first_text()?.to_string();
        debug!("Model returned {} chars", text.chars().count());
        Ok(text)
    }
}
