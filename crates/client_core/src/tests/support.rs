//! Recording doubles for the controller's ports.

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::{error::ServiceException, protocol::HealthResponse};

use crate::{
    controller::ConversionController,
    error::TransportError,
    types::{Notice, SaveOutcome},
    ClipboardSink, FileSaver, NotesBackend, Notifier,
};

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub notices: Arc<Mutex<Vec<Notice>>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notice: Notice) {
        self.notices.lock().expect("notices lock").push(notice);
    }
}

#[derive(Clone, Default)]
pub struct RecordingClipboard {
    pub writes: Arc<Mutex<Vec<String>>>,
}

impl ClipboardSink for RecordingClipboard {
    fn write_text(&mut self, text: &str) {
        self.writes.lock().expect("clipboard lock").push(text.to_string());
    }
}

#[derive(Clone, Default)]
pub struct RecordingFileSaver {
    pub saves: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
    pub fail_with: Option<String>,
    /// Behaves like a save dialog the user dismissed.
    pub cancel: bool,
}

impl FileSaver for RecordingFileSaver {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> Result<SaveOutcome> {
        if let Some(err) = &self.fail_with {
            return Err(anyhow!(err.clone()));
        }
        if self.cancel {
            return Ok(SaveOutcome::Cancelled);
        }
        self.saves
            .lock()
            .expect("saves lock")
            .push((filename.to_string(), bytes.to_vec()));
        Ok(SaveOutcome::Saved)
    }
}

#[derive(Default)]
pub struct Harness {
    pub notifier: RecordingNotifier,
    pub clipboard: RecordingClipboard,
    pub saver: RecordingFileSaver,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failing_saver(err: &str) -> Self {
        let mut harness = Self::new();
        harness.saver.fail_with = Some(err.to_string());
        harness
    }

    pub fn with_cancelled_save() -> Self {
        let mut harness = Self::new();
        harness.saver.cancel = true;
        harness
    }

    pub fn controller(&self) -> ConversionController {
        ConversionController::new(
            Box::new(self.notifier.clone()),
            Box::new(self.clipboard.clone()),
            Box::new(self.saver.clone()),
        )
    }

    pub fn titles(&self) -> Vec<String> {
        self.notifier
            .notices
            .lock()
            .expect("notices lock")
            .iter()
            .map(|notice| notice.title.clone())
            .collect()
    }

    pub fn last_notice(&self) -> Option<Notice> {
        self.notifier
            .notices
            .lock()
            .expect("notices lock")
            .last()
            .cloned()
    }

    pub fn clipboard_writes(&self) -> Vec<String> {
        self.clipboard.writes.lock().expect("clipboard lock").clone()
    }

    pub fn saves(&self) -> Vec<(String, Vec<u8>)> {
        self.saver.saves.lock().expect("saves lock").clone()
    }
}

pub fn service_error(status: u16, detail: &str) -> TransportError {
    TransportError::Service(ServiceException::new(status, detail))
}

/// Backend with canned answers that records every call it receives.
pub struct ScriptedBackend {
    notes: std::result::Result<String, (u16, String)>,
    pdf: std::result::Result<Vec<u8>, (u16, String)>,
    pub generate_calls: Arc<Mutex<Vec<String>>>,
    pub export_calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedBackend {
    pub fn ok(notes: &str, pdf: &[u8]) -> Self {
        Self {
            notes: Ok(notes.to_string()),
            pdf: Ok(pdf.to_vec()),
            generate_calls: Arc::new(Mutex::new(Vec::new())),
            export_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing_generation(mut self, status: u16, detail: &str) -> Self {
        self.notes = Err((status, detail.to_string()));
        self
    }

    pub fn failing_export(mut self, status: u16, detail: &str) -> Self {
        self.pdf = Err((status, detail.to_string()));
        self
    }
}

#[async_trait]
impl NotesBackend for ScriptedBackend {
    async fn generate_notes(&self, url: &str) -> Result<String, TransportError> {
        self.generate_calls
            .lock()
            .expect("generate calls lock")
            .push(url.to_string());
        match &self.notes {
            Ok(notes) => Ok(notes.clone()),
            Err((status, detail)) => Err(service_error(*status, detail)),
        }
    }

    async fn export_pdf(&self, markdown: &str) -> Result<Vec<u8>, TransportError> {
        self.export_calls
            .lock()
            .expect("export calls lock")
            .push(markdown.to_string());
        match &self.pdf {
            Ok(pdf) => Ok(pdf.clone()),
            Err((status, detail)) => Err(service_error(*status, detail)),
        }
    }

    async fn health(&self) -> Result<HealthResponse, TransportError> {
        Ok(HealthResponse {
            status: "ok".into(),
        })
    }
}
