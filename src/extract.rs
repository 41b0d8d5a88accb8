//! Document text extraction.
//!
//! Turns a batch of uploaded documents into one plain-text string for the
//! chunker. Upload order is preserved and PDF pages come out in document
//! order; extracted texts are concatenated directly, so the last chunk of one
//! document and the first of the next can share a chunk. The first unreadable
//! document aborts the whole batch, leaving the caller's session untouched.

use crate::types::{AppError, DocumentFormat, DocumentUpload, Result};
use tracing::debug;

/// Extract the combined text of a batch of uploads.
pub fn extract_documents(uploads: &[DocumentUpload]) -> Result<String> {
    let mut combined = String::new();

    for upload in uploads {
        let text = extract_one(upload)?;
        debug!(
            document = %upload.name,
            bytes = upload.bytes.len(),
            extracted_chars = text.chars().count(),
            "Extracted document"
        );
        combined.push_str(&text);
    }

    Ok(combined)
}

fn extract_one(upload: &DocumentUpload) -> Result<String> {
    match upload.format {
        DocumentFormat::Pdf => pdf_extract::extract_text_from_mem(&upload.bytes)
            .map_err(|e| AppError::Extraction(format!("{}: {}", upload.name, e))),
        DocumentFormat::PlainText => String::from_utf8(upload.bytes.clone())
            .map_err(|e| AppError::Extraction(format!("{}: invalid UTF-8 ({})", upload.name, e))),
    }
}
