//! PowerPoint presentation extraction.
//!
//! Reads the Office Open XML container directly: slides are discovered
//! under `ppt/slides/`, sorted, and each slide's `<a:t>` text runs are
//! collected in document order.

use crate::{Error, Result};
use crate::extractors::TextExtractor;
use async_trait::async_trait;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

/// PowerPoint extractor (.pptx).
pub struct PptxExtractor;

impl PptxExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PptxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextExtractor for PptxExtractor {
    fn name(&self) -> &str {
        "pptx-extractor"
    }

    fn extensions(&self) -> &[&str] {
        &[".pptx"]
    }

    async fn extract(&self, path: &Path) -> Result<String> {
        let file = std::fs::File::open(path)?;
        let mut archive = match ZipArchive::new(file) {
            Ok(archive) => archive,
            Err(zip::result::ZipError::Io(io_err)) => return Err(io_err.into()),
            Err(e) => {
                return Err(Error::parsing(format!(
                    "Failed to read PPTX archive (invalid format): {e}"
                )));
            }
        };

        let slide_paths = find_slide_paths(&mut archive);

        let mut parts: Vec<String> = Vec::with_capacity(slide_paths.len());
        for slide_path in &slide_paths {
            let xml = read_archive_file(&mut archive, slide_path)?;
            let slide_text = slide_text_runs(&xml)?;
            if !slide_text.is_empty() {
                parts.push(slide_text.join("\n"));
            }
        }

        Ok(parts.join("\n"))
    }
}

fn find_slide_paths<R: Read + std::io::Seek>(archive: &mut ZipArchive<R>) -> Vec<String> {
    let mut slide_paths: Vec<String> = archive
        .file_names()
        .filter(|name| name.starts_with("ppt/slides/slide") && name.ends_with(".xml"))
        .map(str::to_string)
        .collect();
    // slide10 must not sort before slide2
    slide_paths.sort_by_key(|path| slide_number(path));
    slide_paths
}

fn slide_number(path: &str) -> u32 {
    path.trim_start_matches("ppt/slides/slide")
        .trim_end_matches(".xml")
        .parse()
        .unwrap_or(u32::MAX)
}

fn read_archive_file<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    path: &str,
) -> Result<Vec<u8>> {
    let mut file = match archive.by_name(path) {
        Ok(file) => file,
        Err(zip::result::ZipError::Io(io_err)) => return Err(io_err.into()),
        Err(e) => {
            return Err(Error::parsing(format!(
                "Failed to read '{path}' from archive: {e}"
            )));
        }
    };
    let mut contents = Vec::new();
    file.read_to_end(&mut contents)?;
    Ok(contents)
}

/// Collect the `<a:t>` text runs of one slide, in document order.
fn slide_text_runs(xml_data: &[u8]) -> Result<Vec<String>> {
    let xml_str = std::str::from_utf8(xml_data)
        .map_err(|_| Error::parsing("Invalid UTF-8 in slide XML".to_string()))?;

    let doc = roxmltree::Document::parse(xml_str)
        .map_err(|e| Error::parsing(format!("Failed to parse slide XML: {e}")))?;

    let runs = doc
        .descendants()
        .filter(|node| node.tag_name().name() == "t")
        .filter_map(|node| node.text())
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .collect();

    Ok(runs)
}
