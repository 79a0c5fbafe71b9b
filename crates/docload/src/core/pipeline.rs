//! Per-file processing pipeline.
//!
//! A small state machine: validate, extract, package. Strictly sequential,
//! first failure short-circuits, and every path ends in exactly one
//! [`ProcessOutcome`]. The pipeline is a pure function of one path plus the
//! shared read-only registry; no outcome depends on any other file.

use crate::extractors::{ExtractorRegistry, RegistryLookup};
use crate::types::{Document, DocumentMetadata, ProcessOutcome, SkipReason};
use crate::core::scanner::extension_key;
use chrono::{DateTime, Utc};
use std::path::Path;
use std::time::Instant;
use tracing::{error, info, warn};

/// Fixed per-file size ceiling: 100 MiB.
pub const MAX_FILE_SIZE_BYTES: u64 = 100 * 1024 * 1024;

/// Run the validate → extract → package sequence for one file.
pub async fn process_file(
    path: &Path,
    root: &Path,
    registry: &ExtractorRegistry,
) -> ProcessOutcome {
    let start = Instant::now();
    let source = relative_source(path, root);
    let file_type = file_type_of(path);

    // Validation. Permission problems anywhere in this sequence are skips,
    // not failures.
    let metadata = match std::fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return skip(source, SkipReason::FileNotFound, None);
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return skip(source, SkipReason::PermissionDenied, Some(e.to_string()));
        }
        Err(e) => {
            return fail(source, path, &crate::Error::Io(e));
        }
    };

    if metadata.file_type().is_symlink() {
        return skip(source, SkipReason::SymlinkUnsupported, None);
    }

    let size_bytes = metadata.len();
    if size_bytes == 0 {
        return skip(source, SkipReason::EmptyFile, None);
    }
    if size_bytes > MAX_FILE_SIZE_BYTES {
        return skip(source, SkipReason::FileTooLarge, None);
    }

    let extractor = match registry.lookup(&extension_key(path)) {
        RegistryLookup::Found(extractor) => extractor,
        RegistryLookup::MissingDependency(dependency) => {
            return skip(
                source,
                SkipReason::DependencyMissing,
                Some(dependency.to_string()),
            );
        }
        RegistryLookup::Unsupported => {
            return skip(source, SkipReason::UnsupportedFormat, None);
        }
    };

    // Extraction. Extractor errors never propagate out of the pipeline.
    let text = match extractor.extract(path).await {
        Ok(text) => text,
        Err(e) if e.is_permission_denied() => {
            return skip(source, SkipReason::PermissionDenied, Some(e.to_string()));
        }
        Err(e) => {
            return fail(source, path, &e);
        }
    };

    if text.trim().is_empty() {
        return skip(source, SkipReason::EmptyFile, None);
    }

    // Packaging. Metadata is fully assembled before the Document exists.
    let modified_at = match metadata.modified() {
        Ok(modified) => DateTime::<Utc>::from(modified).to_rfc3339(),
        Err(e) => {
            return fail(source, path, &crate::Error::Io(e));
        }
    };

    info!(
        "event=file_loaded path={} type={} size={} duration={:.3}s",
        path.display(),
        file_type,
        size_bytes,
        start.elapsed().as_secs_f64()
    );

    ProcessOutcome::Success(Document {
        page_content: text,
        metadata: DocumentMetadata {
            source,
            file_type,
            size_bytes,
            modified_at,
        },
    })
}

fn skip(source: String, reason: SkipReason, detail: Option<String>) -> ProcessOutcome {
    warn!("event=file_skipped path={} reason={}", source, reason);
    ProcessOutcome::Skipped {
        source,
        reason,
        detail,
    }
}

fn fail(source: String, path: &Path, error: &crate::Error) -> ProcessOutcome {
    // Full error chain goes to the log sink only; the returned record keeps
    // the display message.
    error!(
        "event=extraction_failed path={} error={} chain={:?}",
        path.display(),
        error,
        error
    );
    ProcessOutcome::Failed {
        source,
        message: error.to_string(),
    }
}

/// Lowercase extension without the dot, or `"unknown"`.
fn file_type_of(path: &Path) -> String {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() => ext.to_lowercase(),
        _ => "unknown".to_string(),
    }
}

/// Path relative to the scan root, `/`-separated on every platform.
pub fn relative_source(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) => relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => path.to_string_lossy().replace('\\', "/"),
    }
}
