use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/api/health", get(handlers::health_check))

        // Page support
        .route("/api/languages", get(handlers::list_languages))
        .route("/api/session", get(handlers::get_session))
        .route("/api/translator/open", post(handlers::open_translator))

        // User actions
        .route("/api/lecture", post(handlers::create_lecture))
        .route("/api/translate", post(handlers::translate_text))
        .route("/api/documents/:id", get(handlers::download_document))
}

/// The API plus the static single-page frontend.
pub fn build_app(state: AppState) -> Router {
    let frontend = ServeDir::new(&state.config.frontend_dir);

    Router::new()
        .merge(create_routes())
        .fallback_service(frontend)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::error::GenerationError;
    use crate::generation::client::tests::StubGenerator;
    use crate::generation::GenerateContentResponse;
    use crate::handlers::SESSION_HEADER;
    use axum::{
        body::{self, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app(stub: Arc<StubGenerator>) -> Router {
        let mut config = AppConfig::default();
        config.export.dir = std::env::temp_dir()
            .join(format!("professor-routes-{}", uuid::Uuid::new_v4()))
            .to_string_lossy()
            .into_owned();
        let state = AppState::new(config, stub).unwrap();
        build_app(state)
    }

    fn post_json(uri: &str, session: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
        if let Some(id) = session {
            builder = builder.header(SESSION_HEADER, id);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn lecture_returns_presentation_and_downloadable_pdf() {
        let stub = Arc::new(StubGenerator::replying("The mitochondria is the powerhouse of the cell."));
        let app = test_app(stub.clone());

        let response = app
            .clone()
            .oneshot(post_json("/api/lecture", None, json!({"topic": "World War II"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(SESSION_HEADER));

        let payload = json_body(response).await;
        let presentation = &payload["presentation"];
        assert_eq!(presentation["text"], "The mitochondria is the powerhouse of the cell.");
        assert_eq!(presentation["download"]["file_name"], "World_War_II_lecture.pdf");
        assert_eq!(presentation["download"]["mime"], "application/pdf");
        assert!(payload["warning"].is_null());

        let url = presentation["download"]["url"].as_str().unwrap().to_string();
        let download = app
            .oneshot(Request::get(url.as_str()).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(download.status(), StatusCode::OK);
        assert_eq!(download.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            download.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"World_War_II_lecture.pdf\""
        );
        let bytes = body::to_bytes(download.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn blank_topic_is_a_validation_warning() {
        let stub = Arc::new(StubGenerator::replying("unused"));
        let app = test_app(stub.clone());

        let response = app
            .oneshot(post_json("/api/lecture", None, json!({"topic": "   "})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let payload = json_body(response).await;
        assert_eq!(payload["kind"], "validation");
        assert_eq!(payload["level"], "warning");
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn empty_model_response_is_reported_without_a_document() {
        let stub = Arc::new(StubGenerator::with(|| Ok(GenerateContentResponse::default())));
        let app = test_app(stub);

        let response = app
            .oneshot(post_json("/api/lecture", None, json!({"topic": "Cats"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let payload = json_body(response).await;
        assert_eq!(payload["kind"], "empty_response");
        assert_eq!(payload["level"], "warning");
    }

    #[tokio::test]
    async fn transport_failure_is_shown_as_an_error() {
        let stub = Arc::new(StubGenerator::with(|| {
            Err(GenerationError::Transport("401 Unauthorized: API key not valid".into()))
        }));
        let app = test_app(stub);

        let response = app
            .oneshot(post_json("/api/lecture", None, json!({"topic": "Cats"})))
            .await
            .unwrap();

        let payload = json_body(response).await;
        assert_eq!(payload["kind"], "transport");
        assert_eq!(payload["level"], "error");
        assert_eq!(payload["error"], "Error: 401 Unauthorized: API key not valid");
    }

    #[tokio::test]
    async fn translate_same_language_is_informational_and_skips_the_model() {
        let stub = Arc::new(StubGenerator::replying("unused"));
        let app = test_app(stub.clone());

        let response = app
            .oneshot(post_json(
                "/api/translate",
                None,
                json!({"text": "Hello", "source_language": "English", "target_language": "English"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let payload = json_body(response).await;
        assert_eq!(payload["level"], "info");
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn translate_returns_text_without_download() {
        let stub = Arc::new(StubGenerator::replying("Bonjour"));
        let app = test_app(stub.clone());

        let response = app
            .oneshot(post_json(
                "/api/translate",
                None,
                json!({"text": "Hello", "source_language": "english", "target_language": "French"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let payload = json_body(response).await;
        assert_eq!(payload["presentation"]["text"], "Bonjour");
        assert!(payload["presentation"].get("download").is_none());
        assert_eq!(
            stub.calls(),
            vec!["Translate the following text from English to French:\n\nHello"]
        );
    }

    #[tokio::test]
    async fn translator_panel_flag_follows_the_session() {
        let app = test_app(Arc::new(StubGenerator::replying("unused")));

        let opened = app
            .clone()
            .oneshot(post_json("/api/translator/open", None, json!({})))
            .await
            .unwrap();
        let opened = json_body(opened).await;
        assert_eq!(opened["show_translator"], true);
        let session = opened["session_id"].as_str().unwrap().to_string();

        let same = app
            .clone()
            .oneshot(
                Request::get("/api/session")
                    .header(SESSION_HEADER, session.as_str())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let same = json_body(same).await;
        assert_eq!(same["session_id"], session.as_str());
        assert_eq!(same["show_translator"], true);

        let fresh = app
            .oneshot(Request::get("/api/session").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(json_body(fresh).await["show_translator"], false);
    }

    #[tokio::test]
    async fn unknown_document_is_not_found() {
        let app = test_app(Arc::new(StubGenerator::replying("unused")));
        let uri = format!("/api/documents/{}", uuid::Uuid::new_v4());

        let response = app
            .oneshot(Request::get(uri.as_str()).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_counts_documents_and_sessions() {
        let app = test_app(Arc::new(StubGenerator::replying("Cats are mammals.")));

        app.clone()
            .oneshot(post_json("/api/lecture", None, json!({"topic": "Cats"})))
            .await
            .unwrap();

        let response = app
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let payload = json_body(response).await;
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["documents"], 1);
        assert_eq!(payload["sessions"], 1);
    }

    #[tokio::test]
    async fn languages_lists_the_ten_options() {
        let app = test_app(Arc::new(StubGenerator::replying("unused")));

        let response = app
            .oneshot(Request::get("/api/languages").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let payload = json_body(response).await;
        assert_eq!(payload["languages"].as_array().unwrap().len(), 10);
        assert_eq!(payload["default_source"], "English");
        assert_eq!(payload["default_target"], "Hindi");
    }
}
