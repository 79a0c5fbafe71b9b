//! CSV extraction.
//!
//! Round-trips the file through the csv crate, which normalizes quoting and
//! line endings and rejects structurally broken input.

use crate::{Error, Result};
use crate::extractors::TextExtractor;
use async_trait::async_trait;
use std::path::Path;

/// CSV extractor (.csv).
pub struct CsvExtractor;

impl CsvExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextExtractor for CsvExtractor {
    fn name(&self) -> &str {
        "csv-extractor"
    }

    fn extensions(&self) -> &[&str] {
        &[".csv"]
    }

    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path).await?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes.as_slice());
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());

        for record in reader.records() {
            writer.write_record(&record?)?;
        }

        let buffer = writer
            .into_inner()
            .map_err(|e| Error::parsing(format!("CSV buffer flush failed: {e}")))?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
