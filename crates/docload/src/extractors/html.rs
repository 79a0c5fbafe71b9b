//! HTML extraction.
//!
//! Converts markup to Markdown text; scripts and styles do not survive the
//! conversion.

use crate::{Error, Result};
use crate::extractors::TextExtractor;
use async_trait::async_trait;
use std::path::Path;

/// HTML extractor (.html, .htm).
pub struct HtmlExtractor;

impl HtmlExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HtmlExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextExtractor for HtmlExtractor {
    fn name(&self) -> &str {
        "html-extractor"
    }

    fn extensions(&self) -> &[&str] {
        &[".html", ".htm"]
    }

    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path).await?;
        let html = String::from_utf8_lossy(&bytes);
        html_to_markdown_rs::convert(&html, None)
            .map_err(|e| Error::parsing(format!("Failed to convert HTML to Markdown: {e}")))
    }
}
