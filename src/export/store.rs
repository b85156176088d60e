use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{AppError, ExportError};

pub const PDF_MIME: &str = "application/pdf";

/// Reference to a generated document, handed from the exporter to the presenter.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentHandle {
    pub id: Uuid,
    #[serde(skip)]
    pub path: PathBuf,
    pub file_name: String,
    pub mime: &'static str,
}

#[derive(Debug, Clone)]
struct StoredDocument {
    handle: DocumentHandle,
    created_at: DateTime<Utc>,
}

/// Generated documents live in a directory owned by this store. Entries older
/// than the retention period are swept, and the directory goes when the store
/// is dropped.
pub struct DocumentStore {
    root: PathBuf,
    documents: DashMap<Uuid, StoredDocument>,
    retention: Duration,
}

impl DocumentStore {
    /// Create a fresh scoped directory under `parent`.
    pub fn create(parent: &Path, retention: Duration) -> std::io::Result<Self> {
        let root = parent.join(Uuid::new_v4().to_string());
        fs::create_dir_all(&root)?;
        info!("Document directory: {}", root.display());

        Ok(Self {
            root,
            documents: DashMap::new(),
            retention,
        })
    }

    #[cfg(test)]
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, id: Uuid) -> PathBuf {
        self.root.join(format!("{}.pdf", id))
    }

    pub fn register(&self, handle: DocumentHandle) {
        debug!("Registered document {} as {}", handle.id, handle.file_name);
        self.documents.insert(
            handle.id,
            StoredDocument {
                handle,
                created_at: Utc::now(),
            },
        );
    }

    pub fn get(&self, id: &Uuid) -> Option<DocumentHandle> {
        self.documents.get(id).map(|entry| entry.handle.clone())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Load a registered document's bytes for download.
    pub async fn read(&self, id: Uuid) -> Result<(DocumentHandle, Vec<u8>), AppError> {
        let handle = self.get(&id).ok_or(AppError::DocumentNotFound(id))?;
        match tokio::fs::read(&handle.path).await {
            Ok(bytes) => Ok((handle, bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.documents.remove(&id);
                Err(AppError::DocumentNotFound(id))
            }
            Err(e) => Err(ExportError::Io(e).into()),
        }
    }

    /// Delete documents older than the retention period. Returns how many went.
    pub fn sweep_expired(&self, now: DateTime<Utc>) -> usize {
        let expired: Vec<Uuid> = self
            .documents
            .iter()
            .filter(|entry| {
                now.signed_duration_since(entry.created_at)
                    .to_std()
                    .map(|age| age >= self.retention)
                    .unwrap_or(false)
            })
            .map(|entry| *entry.key())
            .collect();

        for id in &expired {
            if let Some((_, doc)) = self.documents.remove(id) {
                remove_file_quietly(&doc.handle.path);
            }
        }

        if !expired.is_empty() {
            debug!("Swept {} expired documents", expired.len());
        }
        expired.len()
    }
}

impl Drop for DocumentStore {
    fn drop(&mut self) {
        match fs::remove_dir_all(&self.root) {
            Ok(()) => info!("Removed document directory {}", self.root.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove document directory {}: {}", self.root.display(), e),
        }
    }
}

fn remove_file_quietly(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!("Failed to remove document {}: {}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_parent() -> PathBuf {
        std::env::temp_dir().join(format!("professor-store-{}", Uuid::new_v4()))
    }

    fn write_document(store: &DocumentStore, name: &str) -> DocumentHandle {
        let id = Uuid::new_v4();
        let path = store.path_for(id);
        fs::write(&path, b"%PDF-1.3").unwrap();
        let handle = DocumentHandle {
            id,
            path,
            file_name: name.to_string(),
            mime: PDF_MIME,
        };
        store.register(handle.clone());
        handle
    }

    #[tokio::test]
    async fn reads_registered_documents_repeatedly() {
        let store = DocumentStore::create(&scratch_parent(), Duration::from_secs(60)).unwrap();
        let handle = write_document(&store, "Cats_lecture.pdf");

        for _ in 0..2 {
            let (found, bytes) = store.read(handle.id).await.unwrap();
            assert_eq!(found.file_name, "Cats_lecture.pdf");
            assert_eq!(bytes, b"%PDF-1.3");
        }
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let store = DocumentStore::create(&scratch_parent(), Duration::from_secs(60)).unwrap();
        let err = store.read(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::DocumentNotFound(_)));
    }

    #[test]
    fn sweep_deletes_only_expired_documents() {
        let store = DocumentStore::create(&scratch_parent(), Duration::from_secs(60)).unwrap();
        let handle = write_document(&store, "a.pdf");

        assert_eq!(store.sweep_expired(Utc::now()), 0);
        assert!(handle.path.exists());

        let later = Utc::now() + chrono::Duration::seconds(61);
        assert_eq!(store.sweep_expired(later), 1);
        assert!(!handle.path.exists());
        assert!(store.get(&handle.id).is_none());
    }

    #[test]
    fn dropping_the_store_removes_its_directory() {
        let store = DocumentStore::create(&scratch_parent(), Duration::from_secs(60)).unwrap();
        write_document(&store, "a.pdf");
        let root = store.root().to_path_buf();
        assert!(root.exists());

        drop(store);
        assert!(!root.exists());
    }
}
