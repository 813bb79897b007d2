//! Axum route handler for JD file upload.

use axum::{extract::Multipart, Json};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::ingest::{extract, DocumentKind};

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub file_name: String,
    pub kind: DocumentKind,
    pub jd_text: String,
    /// Set when extraction failed and `jd_text` is empty as a result.
    pub warning: Option<String>,
}

/// POST /api/v1/jd/extract
///
/// Accepts a multipart upload with a `file` field (TXT / PDF / DOCX) and returns its
/// plain text. A document that cannot be read comes back with empty `jd_text` and a
/// `warning` instead of an error, so the user can paste the JD by hand.
pub async fn handle_extract(mut multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload.txt").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;

        return Ok(Json(extract_upload(file_name, bytes).await?));
    }

    Err(AppError::Validation(format!(
        "Multipart field '{FILE_FIELD}' is required"
    )))
}

pub async fn extract_upload(file_name: String, bytes: Bytes) -> Result<ExtractResponse, AppError> {
    let kind = DocumentKind::from_file_name(&file_name);

    let result = if kind.is_container() {
        let name = file_name.clone();
        tokio::task::spawn_blocking(move || extract(&name, &bytes))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Extraction task failed: {e}")))?
    } else {
        extract(&file_name, &bytes)
    };

    let (jd_text, warning) = match result {
        Ok(text) => {
            info!("Extracted {} chars from {:?} upload", text.len(), kind);
            (text, None)
        }
        Err(e) => {
            warn!("Extraction failed for '{file_name}', returning empty JD: {e}");
            (String::new(), Some(e.to_string()))
        }
    };

    Ok(ExtractResponse {
        file_name,
        kind,
        jd_text,
        warning,
    })
}
