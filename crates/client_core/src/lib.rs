use anyhow::Result;
use async_trait::async_trait;
use shared::protocol::HealthResponse;

pub mod config;
pub mod controller;
pub mod error;
pub mod session;
pub mod transport;
pub mod types;

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

pub use config::{load_settings, Settings};
pub use controller::ConversionController;
pub use error::{ConversionError, TransportError, ValidationError};
pub use session::NotesSession;
pub use transport::HttpNotesBackend;
pub use types::{
    Completion, ExportRequest, ExportTicket, GenerationRequest, GenerationTicket, Notice,
    SaveOutcome, Severity, WorkflowStatus, EXPORT_FILENAME,
};

/// Remote note generation and PDF export.
#[async_trait]
pub trait NotesBackend: Send + Sync {
    async fn generate_notes(&self, url: &str) -> Result<String, TransportError>;
    async fn export_pdf(&self, markdown: &str) -> Result<Vec<u8>, TransportError>;
    async fn health(&self) -> Result<HealthResponse, TransportError>;
}

/// Stand-in used when no backend could be configured; every call fails.
pub struct MissingNotesBackend {
    reason: String,
}

impl MissingNotesBackend {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl NotesBackend for MissingNotesBackend {
    async fn generate_notes(&self, _url: &str) -> Result<String, TransportError> {
        Err(TransportError::Unavailable(self.reason.clone()))
    }

    async fn export_pdf(&self, _markdown: &str) -> Result<Vec<u8>, TransportError> {
        Err(TransportError::Unavailable(self.reason.clone()))
    }

    async fn health(&self) -> Result<HealthResponse, TransportError> {
        Err(TransportError::Unavailable(self.reason.clone()))
    }
}

/// Receives user-facing notices (toasts, status lines, stderr).
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

impl<F> Notifier for F
where
    F: FnMut(Notice),
{
    fn notify(&mut self, notice: Notice) {
        self(notice)
    }
}

/// Host clipboard. Writes are fire-and-forget; implementations log their own failures.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str);
}

/// Hands an exported artifact to the user (save dialog, file on disk).
pub trait FileSaver {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> Result<SaveOutcome>;
}

/// Clipboard for hosts without one; the copy is dropped.
pub struct NullClipboard;

impl ClipboardSink for NullClipboard {
    fn write_text(&mut self, text: &str) {
        tracing::warn!(chars = text.len(), "no clipboard available; copy dropped");
    }
}
