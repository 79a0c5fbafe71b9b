//! Plain text and Markdown extractors.

use crate::Result;
use crate::extractors::TextExtractor;
use async_trait::async_trait;
use std::path::Path;

/// Plain text extractor (.txt).
///
/// Reads the file as UTF-8, replacing invalid sequences instead of failing.
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    fn name(&self) -> &str {
        "plain-text-extractor"
    }

    fn extensions(&self) -> &[&str] {
        &[".txt"]
    }

    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Markdown extractor (.md).
///
/// Markdown is already text; the markup is kept verbatim.
pub struct MarkdownExtractor;

impl MarkdownExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MarkdownExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextExtractor for MarkdownExtractor {
    fn name(&self) -> &str {
        "markdown-extractor"
    }

    fn extensions(&self) -> &[&str] {
        &[".md"]
    }

    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
