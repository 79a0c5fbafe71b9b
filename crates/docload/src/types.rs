//! Public data model: documents, per-file outcomes, progress events, run
//! statistics.
//!
//! Everything here crosses the serialization boundary toward downstream
//! consumers and derives serde accordingly.

use serde::{Deserialize, Serialize};

/// The unit of output: extracted text plus provenance metadata.
///
/// Immutable once constructed; the pipeline fully assembles the metadata
/// before a `Document` exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub page_content: String,
    pub metadata: DocumentMetadata,
}

/// Provenance metadata attached to every [`Document`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Path relative to the scan root, always `/`-separated.
    pub source: String,
    /// Lowercase extension without the dot, or `"unknown"`.
    pub file_type: String,
    pub size_bytes: u64,
    /// File mtime at processing time, RFC 3339 / ISO-8601 UTC.
    pub modified_at: String,
}

/// Why a file was deliberately not processed.
///
/// Closed enumeration; wire names are snake_case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    SymlinkUnsupported,
    FileNotFound,
    PermissionDenied,
    EmptyFile,
    FileTooLarge,
    UnsupportedFormat,
    DependencyMissing,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::SymlinkUnsupported => "symlink_unsupported",
            SkipReason::FileNotFound => "file_not_found",
            SkipReason::PermissionDenied => "permission_denied",
            SkipReason::EmptyFile => "empty_file",
            SkipReason::FileTooLarge => "file_too_large",
            SkipReason::UnsupportedFormat => "unsupported_format",
            SkipReason::DependencyMissing => "dependency_missing",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal result for one processed path. Exactly one per discovered file.
///
/// `Skipped` covers every anticipated condition (the closed [`SkipReason`]
/// set); `Failed` is reserved for unexpected extractor errors.
#[derive(Debug, Clone)]
pub enum ProcessOutcome {
    Success(Document),
    Skipped {
        /// Relative `/`-separated path, same convention as document sources.
        source: String,
        reason: SkipReason,
        detail: Option<String>,
    },
    Failed {
        source: String,
        message: String,
    },
}

impl ProcessOutcome {
    /// The relative path this outcome belongs to.
    pub fn source(&self) -> &str {
        match self {
            ProcessOutcome::Success(doc) => &doc.metadata.source,
            ProcessOutcome::Skipped { source, .. } => source,
            ProcessOutcome::Failed { source, .. } => source,
        }
    }
}

/// One entry in the returned error list.
///
/// Skips carry a `reason` and an empty `error`; failures carry an empty
/// `reason` and the captured `error` message.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub path: String,
    pub reason: String,
    pub error: String,
}

/// Lifecycle milestone kinds delivered on the progress channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressKind {
    ScanComplete,
    Loaded,
    Skipped,
    Failed,
}

/// One progress event.
///
/// `current`, `loaded` and `failed` are the counter values after applying
/// the outcome the event reports; `total` is fixed at scan completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub current: usize,
    pub total: usize,
    pub loaded: usize,
    pub failed: usize,
    pub current_file: String,
    pub kind: ProgressKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Observer for incremental progress.
///
/// Implementations must not block the run for long periods; buffer if the
/// downstream consumer is slow. Absence of an observer does not change
/// processing behavior.
pub trait ProgressObserver: Send + Sync {
    fn on_event(&self, event: &ProgressEvent);
}

/// Final counters for one run, computed once at run end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub total_files: usize,
    pub loaded: usize,
    pub failed: usize,
    /// Wall-clock duration, rounded to milliseconds.
    pub duration_seconds: f64,
}

/// Everything one run produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadReport {
    pub documents: Vec<Document>,
    pub errors: Vec<ErrorEntry>,
    pub stats: RunStats,
}
