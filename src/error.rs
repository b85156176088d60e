use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Startup failures. These abort the process before the server binds.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("API key not found: looked for `{key}` in {secrets_file} and environment variable {env_var}")]
    MissingApiKey {
        key: String,
        secrets_file: String,
        env_var: String,
    },

    #[error("failed to read secrets file {path}: {message}")]
    Secrets { path: String, message: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Failures of a single call to the generation endpoint.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("No response received from the model.")]
    NoCandidates,

    #[error("The response was empty.")]
    EmptyContent,

    #[error("{0}")]
    Transport(String),
}

impl GenerationError {
    /// Both "no candidates" and "no usable part" count as an empty response.
    pub fn is_empty_response(&self) -> bool {
        matches!(self, Self::NoCandidates | Self::EmptyContent)
    }
}

/// Input rejected before any call to the model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a topic.")]
    BlankTopic,

    #[error("Please enter some text.")]
    BlankText,

    #[error("Source and target languages are the same.")]
    SameLanguage,

    #[error("Unsupported language: {0}")]
    UnknownLanguage(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write document: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF writer failed: {0}")]
    Pdf(String),

    #[error("document rendering task failed: {0}")]
    Task(String),
}

/// Severity shown next to an inline message in the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

impl MessageLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageLevel::Info => "info",
            MessageLevel::Warning => "warning",
            MessageLevel::Error => "error",
        }
    }
}

/// Everything a user action can fail with, mapped onto an HTTP response.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Document {0} not found or expired.")]
    DocumentNotFound(Uuid),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::Generation(e) if e.is_empty_response() => "empty_response",
            AppError::Generation(_) => "transport",
            AppError::Export(_) => "export",
            AppError::DocumentNotFound(_) => "not_found",
        }
    }

    pub fn level(&self) -> MessageLevel {
        match self {
            AppError::Validation(ValidationError::SameLanguage) => MessageLevel::Info,
            AppError::Validation(_) => MessageLevel::Warning,
            AppError::Generation(e) if e.is_empty_response() => MessageLevel::Warning,
            AppError::DocumentNotFound(_) => MessageLevel::Warning,
            _ => MessageLevel::Error,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Generation(_) => StatusCode::BAD_GATEWAY,
            AppError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DocumentNotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::Generation(GenerationError::Transport(detail)) => format!("Error: {}", detail),
            other => other.to_string(),
        };

        (
            self.status(),
            Json(json!({
                "error": message,
                "kind": self.kind(),
                "level": self.level().as_str(),
            })),
        )
            .into_response()
    }
}
