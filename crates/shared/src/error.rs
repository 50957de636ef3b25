use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by the notes API on non-success responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceErrorBody {
    pub detail: String,
}

impl ServiceErrorBody {
    /// Extracts `detail` from a raw response body, falling back to the trimmed text.
    pub fn detail_from_body(body: &str) -> Option<String> {
        if let Ok(parsed) = serde_json::from_str::<ServiceErrorBody>(body) {
            return Some(parsed.detail);
        }
        let trimmed = body.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

#[derive(Debug, Error)]
#[error("service returned {status}: {detail}")]
pub struct ServiceException {
    pub status: u16,
    pub detail: String,
}

impl ServiceException {
    pub fn new(status: u16, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}
