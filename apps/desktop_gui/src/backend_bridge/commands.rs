//! Backend commands queued from UI to backend worker.

use client_core::{ExportTicket, GenerationTicket};

pub enum BackendCommand {
    GenerateNotes {
        ticket: GenerationTicket,
        url: String,
    },
    ExportPdf {
        ticket: ExportTicket,
        markdown: String,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::GenerateNotes { .. } => "generate_notes",
            BackendCommand::ExportPdf { .. } => "export_pdf",
        }
    }
}
