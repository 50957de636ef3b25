//! Command orchestration from controller requests to the backend command queue.

use client_core::{ConversionController, ExportRequest, GenerationRequest, TransportError};
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), TransportError> {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => Err(TransportError::Unavailable(
            "UI command queue is full; please retry".to_string(),
        )),
        Err(TrySendError::Disconnected(_)) => Err(TransportError::Unavailable(
            "Backend command processor disconnected".to_string(),
        )),
    }
}

/// Queues a generation; a queueing failure completes the request immediately.
pub fn start_generation(
    controller: &mut ConversionController,
    cmd_tx: &Sender<BackendCommand>,
    request: GenerationRequest,
) {
    let ticket = request.ticket;
    let cmd = BackendCommand::GenerateNotes {
        ticket,
        url: request.url,
    };
    if let Err(err) = dispatch_backend_command(cmd_tx, cmd) {
        tracing::warn!(ticket = ticket.id(), "generation not queued: {err}");
        controller.complete_generation(ticket, Err(err));
    }
}

pub fn start_export(
    controller: &mut ConversionController,
    cmd_tx: &Sender<BackendCommand>,
    request: ExportRequest,
) {
    let ticket = request.ticket;
    let cmd = BackendCommand::ExportPdf {
        ticket,
        markdown: request.markdown,
    };
    if let Err(err) = dispatch_backend_command(cmd_tx, cmd) {
        tracing::warn!(ticket = ticket.id(), "export not queued: {err}");
        controller.complete_export(ticket, Err(err));
    }
}

/// Applies one backend event to the controller.
pub fn apply_ui_event(controller: &mut ConversionController, event: UiEvent) -> Option<String> {
    match event {
        UiEvent::NotesGenerated { ticket, result } => {
            controller.complete_generation(ticket, result);
            None
        }
        UiEvent::PdfExported { ticket, result } => {
            controller.complete_export(ticket, result);
            None
        }
        UiEvent::BackendUnavailable(reason) => Some(reason),
    }
}
