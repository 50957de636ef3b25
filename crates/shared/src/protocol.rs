use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateNotesRequest {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateNotesResponse {
    pub markdown: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratePdfRequest {
    pub markdown: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_notes_request_uses_url_field() {
        let body = serde_json::to_value(GenerateNotesRequest {
            url: "https://youtube.com/watch?v=abc".into(),
        })
        .expect("serialize");
        assert_eq!(
            body,
            serde_json::json!({ "url": "https://youtube.com/watch?v=abc" })
        );
    }

    #[test]
    fn generate_pdf_request_uses_markdown_field() {
        let body = serde_json::to_string(&GeneratePdfRequest {
            markdown: "abc".into(),
        })
        .expect("serialize");
        assert_eq!(body, r#"{"markdown":"abc"}"#);
    }

    #[test]
    fn generate_notes_response_ignores_unknown_fields() {
        let parsed: GenerateNotesResponse =
            serde_json::from_str(r##"{"markdown":"# Title","model":"x"}"##).expect("parse");
        assert_eq!(parsed.markdown, "# Title");
    }

    #[test]
    fn health_status_is_case_insensitive() {
        let parsed: HealthResponse = serde_json::from_str(r#"{"status":"OK"}"#).expect("parse");
        assert!(parsed.is_ok());
        assert!(!HealthResponse {
            status: "degraded".into()
        }
        .is_ok());
    }
}
