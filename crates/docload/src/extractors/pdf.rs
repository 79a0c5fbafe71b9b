//! PDF text extraction using lopdf.
//!
//! Extracts the embedded text layer page by page. Scanned PDFs without a
//! text layer come back empty, which the pipeline reports as an empty-file
//! skip rather than a failure.

use crate::{Error, Result};
use crate::extractors::TextExtractor;
use async_trait::async_trait;
use std::path::Path;

/// PDF extractor (.pdf).
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextExtractor for PdfExtractor {
    fn name(&self) -> &str {
        "pdf-extractor"
    }

    fn extensions(&self) -> &[&str] {
        &[".pdf"]
    }

    async fn extract(&self, path: &Path) -> Result<String> {
        let document = lopdf::Document::load(path).map_err(map_lopdf_error)?;

        let mut parts: Vec<String> = Vec::new();
        for page_number in document.get_pages().keys() {
            let page_text = document
                .extract_text(&[*page_number])
                .map_err(map_lopdf_error)?;
            if !page_text.trim().is_empty() {
                parts.push(page_text);
            }
        }

        Ok(parts.join("\n"))
    }
}

fn map_lopdf_error(err: lopdf::Error) -> Error {
    match err {
        lopdf::Error::IO(io_err) => Error::Io(io_err),
        other => Error::parsing(format!("PDF text extraction failed: {other}")),
    }
}
