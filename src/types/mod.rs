use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============= API Request/Response Types =============

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub question: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub answer: String,
    pub sources: Vec<Source>,
    pub history: Vec<Message>,
}

/// A chunk that contributed context to an answer.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct Source {
    pub chunk_id: usize,
    pub score: f32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IngestResponse {
    pub documents: usize,
    pub chunks: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HistoryResponse {
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// ============= Conversation Types =============

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

// ============= Document Types =============

/// An uploaded document awaiting extraction. Consumed once by ingestion,
/// never retained.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub name: String,
    pub format: DocumentFormat,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    PlainText,
}

impl DocumentFormat {
    /// Detect the format from the uploaded file name, falling back to the
    /// multipart content type.
    pub fn detect(name: &str, content_type: Option<&str>) -> Result<Self> {
        let lower = name.to_lowercase();
        if lower.ends_with(".pdf") {
            return Ok(DocumentFormat::Pdf);
        }
        if lower.ends_with(".txt") || lower.ends_with(".md") {
            return Ok(DocumentFormat::PlainText);
        }

        match content_type {
            Some("application/pdf") => Ok(DocumentFormat::Pdf),
            Some(ct) if ct.starts_with("text/") => Ok(DocumentFormat::PlainText),
            _ => Err(AppError::InvalidInput(format!(
                "Unsupported document type for '{}'",
                name
            ))),
        }
    }
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Provider timeout: {0}")]
    ProviderTimeout(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("No documents have been ingested yet")]
    NotReady,

    #[error("Vector index error: {0}")]
    Index(#[from] docchat_vector::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let status = match &self {
            AppError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotReady => StatusCode::CONFLICT,
            AppError::ProviderTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Embedding(_) | AppError::Generation(_) => StatusCode::BAD_GATEWAY,
            AppError::Configuration(_) | AppError::Index(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = serde_json::json!({
            "error": self.to_string()
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection_by_extension() {
        assert_eq!(
            DocumentFormat::detect("report.PDF", None).unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::detect("notes.txt", None).unwrap(),
            DocumentFormat::PlainText
        );
        assert_eq!(
            DocumentFormat::detect("readme.md", None).unwrap(),
            DocumentFormat::PlainText
        );
    }

    #[test]
    fn test_format_detection_by_content_type() {
        assert_eq!(
            DocumentFormat::detect("upload", Some("application/pdf")).unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::detect("upload", Some("text/plain")).unwrap(),
            DocumentFormat::PlainText
        );
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result = DocumentFormat::detect("photo.png", Some("image/png"));
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_message_constructors() {
        let user = Message::user("hello");
        assert_eq!(user.role, MessageRole::User);
        assert_eq!(user.role.as_str(), "user");

        let assistant = Message::assistant("hi");
        assert_eq!(assistant.role, MessageRole::Assistant);
        assert_eq!(assistant.role.as_str(), "assistant");
    }
}
