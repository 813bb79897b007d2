//! PDF text extraction via `pdf-extract`.

use std::panic::{catch_unwind, AssertUnwindSafe};

use super::ExtractionError;

/// Extracts the text layer of every page, one page per newline-separated block.
/// Pages without a text layer (scans, images) contribute an empty string rather
/// than failing the whole document.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    // pdf-extract panics on some malformed font tables instead of returning Err.
    let pages = catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }))
    .map_err(|_| ExtractionError::Pdf("parser aborted on malformed document".to_string()))?
    .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    Ok(pages.join("\n"))
}
