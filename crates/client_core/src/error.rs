use shared::error::ServiceException;
use thiserror::Error;

use crate::types::Notice;

/// Failures talking to the notes API. Never shown to the user verbatim.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid api base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error(transparent)]
    Service(#[from] ServiceException),
    #[error("failed to decode response: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("notes backend is unavailable: {0}")]
    Unavailable(String),
}

impl TransportError {
    /// HTTP status of a non-success response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Service(err) => Some(err.status),
            TransportError::Request(err) | TransportError::Decode(err) => {
                err.status().map(|status| status.as_u16())
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("video url is empty")]
    EmptyVideoUrl,
    #[error("there are no notes to export")]
    EmptyNotes,
}

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("note generation failed: {0}")]
    RemoteGeneration(#[source] TransportError),
    #[error("pdf export failed: {0}")]
    RemoteExport(#[source] TransportError),
    #[error("failed to save exported pdf: {0}")]
    Delivery(String),
}

impl ConversionError {
    /// The generic notice surfaced for this error.
    pub fn notice(&self) -> Notice {
        match self {
            ConversionError::Validation(ValidationError::EmptyVideoUrl) => {
                Notice::empty_video_url()
            }
            ConversionError::Validation(ValidationError::EmptyNotes) => {
                Notice::no_notes_to_download()
            }
            ConversionError::RemoteGeneration(_) => Notice::conversion_failed(),
            ConversionError::RemoteExport(_) | ConversionError::Delivery(_) => {
                Notice::download_failed()
            }
        }
    }
}
