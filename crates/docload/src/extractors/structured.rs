//! Structured data extraction (JSON).
//!
//! Parses the document and re-serializes it pretty-printed, so malformed
//! files fail extraction instead of leaking through as raw bytes and the
//! output has a canonical layout.

use crate::Result;
use crate::extractors::TextExtractor;
use async_trait::async_trait;
use std::path::Path;

/// JSON extractor (.json).
pub struct JsonExtractor;

impl JsonExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextExtractor for JsonExtractor {
    fn name(&self) -> &str {
        "json-extractor"
    }

    fn extensions(&self) -> &[&str] {
        &[".json"]
    }

    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path).await?;
        let value: serde_json::Value = serde_json::from_slice(&bytes)?;
        Ok(serde_json::to_string_pretty(&value)?)
    }
}
