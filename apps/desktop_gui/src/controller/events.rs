//! Events delivered from the backend worker to the UI thread.

use client_core::{ExportTicket, GenerationTicket, TransportError};

pub enum UiEvent {
    NotesGenerated {
        ticket: GenerationTicket,
        result: Result<String, TransportError>,
    },
    PdfExported {
        ticket: ExportTicket,
        result: Result<Vec<u8>, TransportError>,
    },
    BackendUnavailable(String),
}
