//! Document text extraction.
//!
//! Turns raw uploaded bytes into a single plain-text string for the
//! pipeline. Two formats are accepted: PDF (detected by magic bytes,
//! extracted via `pdf-extract` with page text concatenated in document
//! order) and plain UTF-8 text, passed through unchanged. Anything else
//! fails with [`AskError::Extraction`]; the pipeline builds no partial
//! corpus on failure.

use tracing::debug;

use crate::error::AskError;

/// PDF files start with this marker.
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Extract plain text from raw document bytes.
pub fn extract_text(bytes: &[u8]) -> Result<String, AskError> {
    if bytes.starts_with(PDF_MAGIC) {
        return extract_pdf(bytes);
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => {
            debug!(bytes = bytes.len(), "treating input as plain text");
            Ok(text.to_string())
        }
        Err(_) => Err(AskError::Extraction(
            "unsupported document format: not a PDF and not UTF-8 text".to_string(),
        )),
    }
}

fn extract_pdf(bytes: &[u8]) -> Result<String, AskError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AskError::Extraction(format!("PDF extraction failed: {}", e)))?;
    debug!(chars = text.chars().count(), "extracted PDF text");
    Ok(text)
}
