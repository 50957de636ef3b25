//! UI layer for the desktop GUI: app shell and host adapters.

pub mod app;
pub mod host;

pub use app::LectureNotesApp;
