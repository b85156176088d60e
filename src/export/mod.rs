pub mod layout;
pub mod pdf_writer;
pub mod store;

use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ExportError;
use crate::utils::sanitize;
use layout::{paginate, wrap_text, PageLayout};

pub use store::{DocumentHandle, DocumentStore, PDF_MIME};

/// Body of the exported document, with both parts sanitized.
pub fn compose_document_text(topic: &str, body: &str) -> String {
    format!("Topic: {}\n\n{}", sanitize(topic), sanitize(body))
}

/// Download name offered to the browser: spaces become underscores.
pub fn download_file_name(topic: &str) -> String {
    format!("{}_lecture.pdf", topic.replace(' ', "_"))
}

/// Renders lecture text into a paginated PDF inside the document store.
pub struct DocumentExporter {
    store: Arc<DocumentStore>,
    layout: PageLayout,
}

impl DocumentExporter {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self {
            store,
            layout: PageLayout::default(),
        }
    }

    /// The wrapped, paginated lines the writer puts on each page.
    pub fn lay_out(&self, topic: &str, body: &str) -> Vec<Vec<String>> {
        let text = compose_document_text(topic, body);
        let lines = wrap_text(&text, self.layout.chars_per_line());
        paginate(lines, self.layout.lines_per_page())
    }

    pub async fn export_document(&self, topic: &str, body: &str) -> Result<DocumentHandle, ExportError> {
        let pages = self.lay_out(topic, body);
        debug!("Laid out document on {} pages", pages.len());
        let title = format!("{} lecture", sanitize(topic));
        let layout = self.layout.clone();

        let bytes = tokio::task::spawn_blocking(move || pdf_writer::render(&title, &pages, &layout))
        .await
        .map_err(|e| ExportError::Task(e.to_string()))??;

        let id = Uuid::new_v4();
        let path = self.store.path_for(id);
        tokio::fs::write(&path, &bytes).await?;

        let handle = DocumentHandle {
            id,
            path,
            file_name: download_file_name(topic),
            mime: PDF_MIME,
        };
        info!("Exported {} ({} bytes)", handle.file_name, bytes.len());
        self.store.register(handle.clone());
        Ok(handle)
    }
}
