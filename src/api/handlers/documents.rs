//! Document upload and ingestion handler.

use crate::{
    AppState,
    types::{AppError, DocumentFormat, DocumentUpload, IngestResponse, Result},
};
use axum::{Json, extract::Multipart, extract::State};
use tracing::info;

/// Upload a set of documents and rebuild the session around them.
///
/// Accepts any number of multipart file parts. A failure anywhere in the
/// pipeline leaves the previously ingested documents and history untouched.
#[utoipa::path(
    post,
    path = "/api/documents",
    responses(
        (status = 200, description = "Documents ingested", body = IngestResponse),
        (status = 400, description = "Invalid upload"),
        (status = 422, description = "A document could not be extracted")
    ),
    tag = "documents"
)]
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<IngestResponse>> {
    let mut uploads = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Malformed multipart body: {}", e)))?
    {
        let name = field
            .file_name()
            .or(field.name())
            .unwrap_or("document")
            .to_string();
        let content_type = field.content_type().map(str::to_string);

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read '{}': {}", name, e)))?;

        let format = DocumentFormat::detect(&name, content_type.as_deref())?;

        uploads.push(DocumentUpload {
            name,
            format,
            bytes: bytes.to_vec(),
        });
    }

    if uploads.is_empty() {
        return Err(AppError::InvalidInput(
            "At least one document is required".to_string(),
        ));
    }

    info!(documents = uploads.len(), "Ingestion requested");

    let summary = state.engine.ingest(uploads).await?;

    Ok(Json(IngestResponse {
        documents: summary.documents,
        chunks: summary.chunks,
    }))
}
