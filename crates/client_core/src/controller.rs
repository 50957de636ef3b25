//! Conversion workflow: video reference in, editable notes out, PDF export on demand.
//!
//! The controller owns all workflow state and never performs I/O itself. Starting a
//! request hands back a [`GenerationRequest`] or [`ExportRequest`] for the caller to
//! execute; the result is fed back through `complete_generation` / `complete_export`.
//! Every completion is checked against the ticket it was issued with, so a response
//! that arrives after a newer submit or a reset is dropped.

use tracing::{debug, error, info};

use crate::{
    error::{ConversionError, TransportError, ValidationError},
    types::{
        Completion, ExportRequest, ExportTicket, GenerationRequest, GenerationTicket, Notice,
        SaveOutcome, WorkflowStatus, EXPORT_FILENAME,
    },
    ClipboardSink, FileSaver, Notifier,
};

pub struct ConversionController {
    video_url: String,
    notes: String,
    status: WorkflowStatus,
    notes_panel_visible: bool,
    generation_epoch: u64,
    session_epoch: u64,
    export_seq: u64,
    pending_export: Option<ExportTicket>,
    export_filename: String,
    notifier: Box<dyn Notifier>,
    clipboard: Box<dyn ClipboardSink>,
    file_saver: Box<dyn FileSaver>,
}

impl ConversionController {
    pub fn new(
        notifier: Box<dyn Notifier>,
        clipboard: Box<dyn ClipboardSink>,
        file_saver: Box<dyn FileSaver>,
    ) -> Self {
        Self {
            video_url: String::new(),
            notes: String::new(),
            status: WorkflowStatus::Idle,
            notes_panel_visible: false,
            generation_epoch: 0,
            session_epoch: 0,
            export_seq: 0,
            pending_export: None,
            export_filename: EXPORT_FILENAME.to_string(),
            notifier,
            clipboard,
            file_saver,
        }
    }

    pub fn with_export_filename(mut self, filename: impl Into<String>) -> Self {
        self.export_filename = filename.into();
        self
    }

    pub fn status(&self) -> WorkflowStatus {
        self.status
    }

    pub fn video_url(&self) -> &str {
        &self.video_url
    }

    pub fn set_video_url(&mut self, url: impl Into<String>) {
        self.video_url = url.into();
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn export_filename(&self) -> &str {
        &self.export_filename
    }

    /// True once a generation has produced non-empty notes; stays true after edits.
    pub fn has_notes(&self) -> bool {
        self.notes_panel_visible
    }

    pub fn can_submit(&self) -> bool {
        self.status != WorkflowStatus::Generating
    }

    pub fn is_exporting(&self) -> bool {
        self.pending_export.is_some()
    }

    pub fn can_export(&self) -> bool {
        self.has_notes() && !self.is_exporting()
    }

    /// Starts a generation for the current video reference.
    ///
    /// Returns `None` when the reference is blank (a validation notice is emitted)
    /// or when a generation is already in flight.
    pub fn submit(&mut self) -> Option<GenerationRequest> {
        if !self.can_submit() {
            debug!(
                ticket = self.generation_epoch,
                "submit ignored while a generation is in flight"
            );
            return None;
        }

        if self.video_url.trim().is_empty() {
            self.report(ConversionError::Validation(ValidationError::EmptyVideoUrl));
            return None;
        }

        self.generation_epoch += 1;
        self.status = WorkflowStatus::Generating;
        let ticket = GenerationTicket(self.generation_epoch);
        info!(ticket = ticket.id(), url = %self.video_url, "requesting note generation");

        Some(GenerationRequest {
            ticket,
            url: self.video_url.clone(),
        })
    }

    pub fn complete_generation(
        &mut self,
        ticket: GenerationTicket,
        result: Result<String, TransportError>,
    ) -> Completion {
        if self.status != WorkflowStatus::Generating || ticket.0 != self.generation_epoch {
            debug!(
                ticket = ticket.id(),
                current = self.generation_epoch,
                status = %self.status,
                "dropping stale generation completion"
            );
            return Completion::Stale;
        }

        match result {
            Ok(markdown) => {
                info!(ticket = ticket.id(), chars = markdown.len(), "notes generated");
                self.notes = markdown;
                if !self.notes.is_empty() {
                    self.notes_panel_visible = true;
                }
                self.status = WorkflowStatus::Ready;
                self.notifier.notify(Notice::notes_generated());
                Completion::Succeeded
            }
            Err(err) => {
                self.status = if self.notes_panel_visible {
                    WorkflowStatus::Ready
                } else {
                    WorkflowStatus::Idle
                };
                self.report(ConversionError::RemoteGeneration(err));
                Completion::Failed
            }
        }
    }

    /// Replaces the notes verbatim. Ignored while the notes panel is hidden.
    pub fn edit_notes(&mut self, text: impl Into<String>) {
        if !self.notes_panel_visible {
            debug!("edit ignored: no notes have been generated");
            return;
        }
        self.notes = text.into();
    }

    pub fn copy_notes(&mut self) {
        if !self.notes_panel_visible {
            debug!("copy ignored: no notes have been generated");
            return;
        }
        self.clipboard.write_text(&self.notes);
        self.notifier.notify(Notice::copied());
    }

    /// Starts an export of the current notes.
    ///
    /// Returns `None` for blank notes (with a validation notice) or while a previous
    /// export is still outstanding.
    pub fn request_export(&mut self) -> Option<ExportRequest> {
        if let Some(pending) = self.pending_export {
            debug!(
                ticket = pending.id(),
                "export ignored while a previous export is in flight"
            );
            return None;
        }

        if self.notes.trim().is_empty() {
            self.report(ConversionError::Validation(ValidationError::EmptyNotes));
            return None;
        }

        self.export_seq += 1;
        let ticket = ExportTicket {
            session: self.session_epoch,
            seq: self.export_seq,
        };
        self.pending_export = Some(ticket);
        info!(ticket = ticket.id(), chars = self.notes.len(), "requesting pdf export");

        Some(ExportRequest {
            ticket,
            markdown: self.notes.clone(),
        })
    }

    pub fn complete_export(
        &mut self,
        ticket: ExportTicket,
        result: Result<Vec<u8>, TransportError>,
    ) -> Completion {
        if self.pending_export != Some(ticket) || ticket.session != self.session_epoch {
            debug!(ticket = ticket.id(), "dropping stale export completion");
            return Completion::Stale;
        }
        self.pending_export = None;

        let bytes = match result {
            Ok(bytes) => bytes,
            Err(err) => {
                self.report(ConversionError::RemoteExport(err));
                return Completion::Failed;
            }
        };

        match self.file_saver.save(&self.export_filename, &bytes) {
            Ok(SaveOutcome::Saved) => {
                info!(
                    ticket = ticket.id(),
                    bytes = bytes.len(),
                    filename = %self.export_filename,
                    "pdf delivered"
                );
                self.notifier.notify(Notice::pdf_downloaded());
                Completion::Succeeded
            }
            Ok(SaveOutcome::Cancelled) => {
                info!(ticket = ticket.id(), "pdf save cancelled by user");
                Completion::Cancelled
            }
            Err(err) => {
                self.report(ConversionError::Delivery(format!("{err:#}")));
                Completion::Failed
            }
        }
    }

    /// Back to the initial state. Outstanding requests become stale.
    pub fn reset(&mut self) {
        info!("resetting conversion session");
        self.generation_epoch += 1;
        self.session_epoch += 1;
        self.pending_export = None;
        self.video_url.clear();
        self.notes.clear();
        self.notes_panel_visible = false;
        self.status = WorkflowStatus::Idle;
    }

    fn report(&mut self, err: ConversionError) {
        match &err {
            ConversionError::Validation(reason) => debug!(%reason, "rejected user action"),
            other => error!(error = %other, "conversion workflow error"),
        }
        self.notifier.notify(err.notice());
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
