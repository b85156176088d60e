mod config;
mod config_manager;
mod error;
mod export;
mod generation;
mod handlers;
mod language;
mod lecture;
mod presenter;
mod routes;
mod state;
mod translate;
mod utils;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::AppConfig;
use config_manager::resolve_api_key;
use generation::GeminiLLM;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("professor_backend=debug,tower_http=debug")),
        )
        .init();

    let (config, loaded_path) = AppConfig::discover(&AppConfig::candidate_paths())?;
    match loaded_path {
        Some(path) => info!("Loaded configuration from: {}", path),
        None => info!("No configuration file found, using defaults"),
    }

    // A missing key stops startup here rather than failing every request.
    let api_key = resolve_api_key(&config.generation)?;
    let generator = Arc::new(GeminiLLM::new(&config.generation, api_key)?);

    let app_state = AppState::new(config.clone(), generator)?;
    let housekeeping = app_state.spawn_housekeeping();

    let app = routes::build_app(app_state);

    let listener = tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    info!("Starting server on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    housekeeping.abort();
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        if let Ok(mut stream) = signal(SignalKind::terminate()) {
            let _ = stream.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
