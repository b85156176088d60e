use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::language::Language;
use crate::lecture::LectureRequest;
use crate::presenter::{content_disposition, present_lecture, present_translation};
use crate::state::AppState;
use crate::translate::{TranslateForm, TranslationRequest};

pub const SESSION_HEADER: &str = "x-session-id";

fn session_id(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|id| !id.is_empty())
}

/// JSON body plus the session id echoed back as a header.
fn session_response(session_id: &str, body: Value) -> Response {
    let mut response = Json(body).into_response();
    if let Ok(value) = HeaderValue::from_str(session_id) {
        response.headers_mut().insert(SESSION_HEADER, value);
    }
    response
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "model": state.config.generation.model,
        "documents": state.documents.len(),
        "sessions": state.sessions.len(),
    }))
}

pub async fn list_languages() -> Json<Value> {
    let names: Vec<&str> = Language::ALL.iter().map(|lang| lang.name()).collect();
    Json(json!({
        "languages": names,
        "default_source": Language::DEFAULT_SOURCE.name(),
        "default_target": Language::DEFAULT_TARGET.name(),
    }))
}

pub async fn get_session(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (id, session) = state.sessions.resolve(session_id(&headers));
    session_response(
        &id,
        json!({
            "session_id": id,
            "show_translator": session.show_translator,
        }),
    )
}

pub async fn open_translator(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (id, session) = state.sessions.open_translator(session_id(&headers));
    info!("Translator panel opened for session {}", id);
    session_response(
        &id,
        json!({
            "session_id": id,
            "show_translator": session.show_translator,
        }),
    )
}

pub async fn create_lecture(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<LectureRequest>,
) -> Result<Response, AppError> {
    let (id, _) = state.sessions.resolve(session_id(&headers));
    let outcome = state.lecturer.deliver(&request).await?;
    let presentation = present_lecture(&outcome.text, outcome.document.as_ref());

    Ok(session_response(
        &id,
        json!({
            "session_id": id,
            "presentation": presentation,
            "warning": outcome.export_warning,
        }),
    ))
}

pub async fn translate_text(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(form): Json<TranslateForm>,
) -> Result<Response, AppError> {
    let (id, _) = state.sessions.resolve(session_id(&headers));
    let request = TranslationRequest::try_from(form)?;
    let text = state.translator.translate(&request).await?;

    Ok(session_response(
        &id,
        json!({
            "session_id": id,
            "presentation": present_translation(&text),
        }),
    ))
}

pub async fn download_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let (document, bytes) = state.documents.read(id).await?;
    info!("Serving {} ({} bytes)", document.file_name, bytes.len());

    Ok((
        [
            (header::CONTENT_TYPE, document.mime.to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&document.file_name)),
        ],
        bytes,
    )
        .into_response())
}
