//! Document ingestion — turns an uploaded JD file into plain text.
//!
//! Classification is by file extension only: `.pdf` and `.docx` get container-aware
//! extraction, everything else is decoded as UTF-8 text.

pub mod docx;
pub mod handlers;
pub mod pdf;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("file is not valid UTF-8 text: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("could not read PDF: {0}")]
    Pdf(String),

    #[error("could not read DOCX: {0}")]
    Docx(String),
}

/// Kind of uploaded document, derived from its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    PlainText,
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Case-insensitive extension match. Unknown extensions are read as plain text.
    pub fn from_file_name(file_name: &str) -> Self {
        let lower = file_name.to_lowercase();
        if lower.ends_with(".pdf") {
            Self::Pdf
        } else if lower.ends_with(".docx") {
            Self::Docx
        } else {
            Self::PlainText
        }
    }

    /// Whether extraction is CPU-heavy enough to move off the async runtime.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Pdf | Self::Docx)
    }
}

/// Extracts plain text from an uploaded file's bytes.
pub fn extract(file_name: &str, bytes: &[u8]) -> Result<String, ExtractionError> {
    match DocumentKind::from_file_name(file_name) {
        DocumentKind::Pdf => pdf::extract_pdf_text(bytes),
        DocumentKind::Docx => docx::extract_docx_text(bytes),
        DocumentKind::PlainText => Ok(String::from_utf8(bytes.to_vec())?),
    }
}
