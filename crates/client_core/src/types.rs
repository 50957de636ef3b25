//! Workflow status, request tickets, and the notices shown to the user.

use std::fmt;

/// File name every exported artifact is saved under unless configured otherwise.
pub const EXPORT_FILENAME: &str = "notes.pdf";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowStatus {
    #[default]
    Idle,
    Generating,
    Ready,
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WorkflowStatus::Idle => "idle",
            WorkflowStatus::Generating => "generating",
            WorkflowStatus::Ready => "ready",
        };
        f.write_str(label)
    }
}

/// Identifies one generation request; only the most recent ticket may complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GenerationTicket(pub(crate) u64);

impl GenerationTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Identifies one export request within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExportTicket {
    pub(crate) session: u64,
    pub(crate) seq: u64,
}

impl ExportTicket {
    pub fn id(self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub ticket: GenerationTicket,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub ticket: ExportTicket,
    pub markdown: String,
}

/// Result of feeding a request completion back into the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Succeeded,
    Failed,
    /// The user dismissed the save; no notice was shown.
    Cancelled,
    /// The ticket was superseded or reset; nothing changed.
    Stale,
}

/// What a [`crate::FileSaver`] did with an exported artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notice {
    fn new(title: &str, description: &str, severity: Severity) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            severity,
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.severity == Severity::Destructive
    }

    pub fn empty_video_url() -> Self {
        Self::new(
            "Please enter a YouTube URL",
            "A valid YouTube video URL is required to generate notes.",
            Severity::Destructive,
        )
    }

    pub fn notes_generated() -> Self {
        Self::new(
            "Notes generated successfully!",
            "Your study notes are ready for download or editing.",
            Severity::Normal,
        )
    }

    pub fn conversion_failed() -> Self {
        Self::new(
            "Conversion failed",
            "There was an error processing your video. Please try again.",
            Severity::Destructive,
        )
    }

    pub fn copied() -> Self {
        Self::new(
            "Copied to clipboard!",
            "Markdown notes have been copied to your clipboard.",
            Severity::Normal,
        )
    }

    pub fn no_notes_to_download() -> Self {
        Self::new(
            "No notes to download",
            "Please generate notes first.",
            Severity::Destructive,
        )
    }

    pub fn pdf_downloaded() -> Self {
        Self::new(
            "PDF downloaded",
            "Your notes are saved as PDF with proper formatting.",
            Severity::Normal,
        )
    }

    pub fn download_failed() -> Self {
        Self::new(
            "Download failed",
            "Could not generate PDF. Try again later.",
            Severity::Destructive,
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}
