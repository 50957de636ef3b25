//! Wire types shared between the LectureLM clients and the notes API.

pub mod error;
pub mod protocol;

pub const GENERATE_NOTES_PATH: &str = "/generate-notes";
pub const GENERATE_PDF_PATH: &str = "/generate-pdf";
pub const HEALTH_PATH: &str = "/";
