use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::export::{DocumentExporter, DocumentStore};
use crate::generation::{GenerationClient, TextGenerator};
use crate::lecture::Lecturer;
use crate::translate::Translator;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub lecturer: Arc<Lecturer>,
    pub translator: Arc<Translator>,
    pub documents: Arc<DocumentStore>,
    pub sessions: Arc<SessionStore>,
}

/// Per-browser-session UI state.
#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    pub show_translator: bool,
    #[serde(skip)]
    pub last_seen: DateTime<Utc>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            show_translator: false,
            last_seen: Utc::now(),
        }
    }
}

pub struct SessionStore {
    sessions: DashMap<String, SessionState>, // session_id -> state
    idle_timeout: Duration,
}

impl AppState {
    pub fn new(config: AppConfig, generator: Arc<dyn TextGenerator>) -> anyhow::Result<Self> {
        let documents = Arc::new(DocumentStore::create(
            Path::new(&config.export.dir),
            Duration::from_secs(config.export.retention_secs),
        )?);

        let generation = Arc::new(GenerationClient::new(generator));
        let exporter = Arc::new(DocumentExporter::new(documents.clone()));
        let sessions = Arc::new(SessionStore::new(Duration::from_secs(config.server.session_idle_secs)));

        Ok(Self {
            lecturer: Arc::new(Lecturer::new(generation.clone(), exporter)),
            translator: Arc::new(Translator::new(generation)),
            documents,
            sessions,
            config: Arc::new(config),
        })
    }

    /// Periodically drop expired documents and idle sessions.
    pub fn spawn_housekeeping(&self) -> JoinHandle<()> {
        let state = self.clone();
        let every = Duration::from_secs(self.config.export.sweep_interval_secs.max(1));
        info!("Housekeeping every {:?}", every);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let now = Utc::now();
                let documents = state.documents.sweep_expired(now);
                let sessions = state.sessions.evict_idle(now);
                if documents > 0 || sessions > 0 {
                    debug!("Housekeeping removed {} documents, {} sessions", documents, sessions);
                }
            }
        })
    }
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            idle_timeout,
        }
    }

    pub fn generate_session_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Touch the session named by `id`, or start a new one when the id is
    /// missing or unknown.
    pub fn resolve(&self, id: Option<&str>) -> (String, SessionState) {
        if let Some(id) = id {
            if let Some(mut session) = self.sessions.get_mut(id) {
                session.last_seen = Utc::now();
                return (id.to_string(), session.clone());
            }
        }

        let id = Self::generate_session_id();
        let session = SessionState::default();
        self.sessions.insert(id.clone(), session.clone());
        debug!("Started session {}", id);
        (id, session)
    }

    pub fn open_translator(&self, id: Option<&str>) -> (String, SessionState) {
        let (id, _) = self.resolve(id);
        let mut session = self.sessions.entry(id.clone()).or_default();
        session.show_translator = true;
        let snapshot = session.clone();
        (id, snapshot)
    }

    pub fn evict_idle(&self, now: DateTime<Utc>) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| {
            now.signed_duration_since(session.last_seen)
                .to_std()
                .map(|idle| idle < self.idle_timeout)
                .unwrap_or(true)
        });
        before.saturating_sub(self.sessions.len())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}
