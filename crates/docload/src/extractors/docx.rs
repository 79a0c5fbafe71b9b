//! Word document extraction using docx-lite.

use crate::{Error, Result};
use crate::extractors::TextExtractor;
use async_trait::async_trait;
use std::path::Path;

/// Word extractor (.docx, .doc).
///
/// docx-lite streams the document XML; paragraph and table cell text comes
/// out in document order.
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextExtractor for DocxExtractor {
    fn name(&self) -> &str {
        "docx-extractor"
    }

    fn extensions(&self) -> &[&str] {
        &[".docx", ".doc"]
    }

    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path).await?;
        docx_lite::extract_text_from_bytes(&bytes)
            .map_err(|e| Error::parsing(format!("DOCX text extraction failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_invalid_docx_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, b"this is not a zip container").unwrap();

        let result = DocxExtractor::new().extract(&path).await;
        assert!(matches!(result, Err(crate::Error::Parsing { .. })));
    }

    #[test]
    fn test_declared_extensions() {
        let extractor = DocxExtractor::new();
        assert_eq!(extractor.extensions(), &[".docx", ".doc"]);
    }
}
