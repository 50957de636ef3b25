//! HTTP client for the notes API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    error::{ServiceErrorBody, ServiceException},
    protocol::{GenerateNotesRequest, GenerateNotesResponse, GeneratePdfRequest, HealthResponse},
    GENERATE_NOTES_PATH, GENERATE_PDF_PATH, HEALTH_PATH,
};
use tracing::{debug, warn};
use url::Url;

use crate::{config::Settings, error::TransportError, NotesBackend};

pub struct HttpNotesBackend {
    http: Client,
    base_url: Url,
}

impl HttpNotesBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, TransportError> {
        Self::new(&settings.api_base_url, settings.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|source| TransportError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                source,
            })
    }
}

fn normalize_base_url(raw: &str) -> Result<Url, TransportError> {
    let trimmed = raw.trim();
    let mut url = Url::parse(trimmed).map_err(|source| TransportError::InvalidBaseUrl {
        url: trimmed.to_string(),
        source,
    })?;
    // Url::join replaces the last path segment unless the base ends with '/'.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

async fn ensure_success(response: Response) -> Result<Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => {
            warn!("failed to read error body for {status}: {err}");
            String::new()
        }
    };
    let detail = ServiceErrorBody::detail_from_body(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    });
    Err(ServiceException::new(status.as_u16(), detail).into())
}

#[async_trait]
impl NotesBackend for HttpNotesBackend {
    async fn generate_notes(&self, url: &str) -> Result<String, TransportError> {
        let endpoint = self.endpoint(GENERATE_NOTES_PATH)?;
        debug!(%endpoint, "posting generate-notes request");
        let response = self
            .http
            .post(endpoint)
            .json(&GenerateNotesRequest {
                url: url.to_string(),
            })
            .send()
            .await?;
        let body: GenerateNotesResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(TransportError::Decode)?;
        Ok(body.markdown)
    }

    async fn export_pdf(&self, markdown: &str) -> Result<Vec<u8>, TransportError> {
        let endpoint = self.endpoint(GENERATE_PDF_PATH)?;
        debug!(%endpoint, chars = markdown.len(), "posting generate-pdf request");
        let response = self
            .http
            .post(endpoint)
            .json(&GeneratePdfRequest {
                markdown: markdown.to_string(),
            })
            .send()
            .await?;
        let bytes = ensure_success(response)
            .await?
            .bytes()
            .await
            .map_err(TransportError::Decode)?;
        Ok(bytes.to_vec())
    }

    async fn health(&self) -> Result<HealthResponse, TransportError> {
        let endpoint = self.endpoint(HEALTH_PATH)?;
        let response = self.http.get(endpoint).send().await?;
        ensure_success(response)
            .await?
            .json()
            .await
            .map_err(TransportError::Decode)
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
