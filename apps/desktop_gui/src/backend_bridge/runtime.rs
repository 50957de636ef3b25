//! Backend worker: owns the tokio runtime and executes queued commands.

use std::{sync::Arc, thread};

use client_core::{HttpNotesBackend, MissingNotesBackend, NotesBackend, Settings};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: Settings) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                report_unavailable(&ui_tx, format!("backend worker startup failure: {err}"));
                return;
            }
        };

        let backend: Arc<dyn NotesBackend> = match HttpNotesBackend::from_settings(&settings) {
            Ok(backend) => {
                tracing::info!(api = %backend.base_url(), "backend worker ready");
                Arc::new(backend)
            }
            Err(err) => {
                tracing::error!("failed to configure notes api: {err}");
                report_unavailable(&ui_tx, err.to_string());
                Arc::new(MissingNotesBackend::new(err.to_string()))
            }
        };

        // Each command runs as its own task so an export never waits on a generation.
        while let Ok(cmd) = cmd_rx.recv() {
            let backend = Arc::clone(&backend);
            let ui_tx = ui_tx.clone();
            runtime.spawn(async move {
                let event = execute(backend.as_ref(), cmd).await;
                if ui_tx.send(event).is_err() {
                    tracing::debug!("ui closed before backend result was delivered");
                }
            });
        }

        tracing::debug!("ui command queue closed; backend worker exiting");
    });
}

fn report_unavailable(ui_tx: &Sender<UiEvent>, reason: String) {
    if let Err(err) = ui_tx.try_send(UiEvent::BackendUnavailable(reason)) {
        tracing::warn!("failed to deliver backend status to ui: {err}");
    }
}

async fn execute(backend: &dyn NotesBackend, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::GenerateNotes { ticket, url } => UiEvent::NotesGenerated {
            ticket,
            result: backend.generate_notes(&url).await,
        },
        BackendCommand::ExportPdf { ticket, markdown } => UiEvent::PdfExported {
            ticket,
            result: backend.export_pdf(&markdown).await,
        },
    }
}
