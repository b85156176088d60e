use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{AppError, ValidationError};
use crate::export::{DocumentExporter, DocumentHandle};
use crate::generation::GenerationClient;

#[derive(Debug, Clone, Deserialize)]
pub struct LectureRequest {
    #[serde(default)]
    pub topic: String,
}

impl LectureRequest {
    #[cfg(test)]
    pub fn new(topic: impl Into<String>) -> Self {
        Self { topic: topic.into() }
    }

    /// The topic with surrounding whitespace removed; blank is rejected.
    pub fn validate(&self) -> Result<&str, ValidationError> {
        let topic = self.topic.trim();
        if topic.is_empty() {
            return Err(ValidationError::BlankTopic);
        }
        Ok(topic)
    }
}

#[derive(Debug, Clone)]
pub struct LectureOutcome {
    pub text: String,
    pub document: Option<DocumentHandle>,
    /// Set when the lecture was generated but the PDF could not be written.
    pub export_warning: Option<String>,
}

/// Lecture flow: validate the topic, ask the model, export the answer.
pub struct Lecturer {
    generation: Arc<GenerationClient>,
    exporter: Arc<DocumentExporter>,
}

impl Lecturer {
    pub fn new(generation: Arc<GenerationClient>, exporter: Arc<DocumentExporter>) -> Self {
        Self { generation, exporter }
    }

    pub async fn deliver(&self, request: &LectureRequest) -> Result<LectureOutcome, AppError> {
        let topic = request.validate()?;
        let text = self.generation.generate_lecture(topic).await?;

        match self.exporter.export_document(topic, &text).await {
            Ok(document) => {
                info!("Lecture on {:?} ready for download as {}", topic, document.file_name);
                Ok(LectureOutcome {
                    text,
                    document: Some(document),
                    export_warning: None,
                })
            }
            Err(e) => {
                warn!("Lecture on {:?} generated but export failed: {}", topic, e);
                Ok(LectureOutcome {
                    text,
                    document: None,
                    export_warning: Some(format!("The PDF could not be prepared: {}", e)),
                })
            }
        }
    }
}
