//! Sequential driver that pairs a controller with a backend.
//!
//! Front ends that have no event loop of their own (the CLI, tests) run each
//! request to completion here. The GUI executes requests on a worker thread instead
//! and feeds completions back into its controller.

use std::sync::Arc;

use crate::{
    controller::ConversionController,
    types::{Completion, WorkflowStatus},
    NotesBackend,
};

pub struct NotesSession {
    controller: ConversionController,
    backend: Arc<dyn NotesBackend>,
}

impl NotesSession {
    pub fn new(controller: ConversionController, backend: Arc<dyn NotesBackend>) -> Self {
        Self {
            controller,
            backend,
        }
    }

    pub fn controller(&self) -> &ConversionController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ConversionController {
        &mut self.controller
    }

    /// Submits `url` and waits for the generation to finish.
    pub async fn convert(&mut self, url: &str) -> WorkflowStatus {
        self.controller.set_video_url(url);
        if let Some(request) = self.controller.submit() {
            let result = self.backend.generate_notes(&request.url).await;
            self.controller.complete_generation(request.ticket, result);
        }
        self.controller.status()
    }

    /// Exports the current notes. `None` means the export never started.
    pub async fn export(&mut self) -> Option<Completion> {
        let request = self.controller.request_export()?;
        let result = self.backend.export_pdf(&request.markdown).await;
        Some(self.controller.complete_export(request.ticket, result))
    }

    pub fn copy(&mut self) {
        self.controller.copy_notes();
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
