//! docload - Concurrent Document Ingestion
//!
//! docload walks a heterogeneous directory tree and turns every supported
//! file into a uniform `(text, metadata)` record, collecting a structured
//! skip/error report alongside. The output is meant as input to downstream
//! text-processing or retrieval pipelines.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use docload::{load_directory_sync, LoaderConfig};
//!
//! # fn main() -> docload::Result<()> {
//! let report = load_directory_sync("./corpus", &LoaderConfig::default(), None)?;
//! println!(
//!     "loaded {} of {} files in {}s",
//!     report.stats.loaded, report.stats.total_files, report.stats.duration_seconds
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Core** (`core`): scanner, per-file pipeline, concurrency
//!   orchestrator, aggregator/progress reporter
//! - **Extractors** (`extractors`): one thin adapter per format behind the
//!   [`TextExtractor`] contract, resolved through an immutable
//!   extension-keyed registry
//!
//! Per-file problems never abort a run: anticipated conditions become
//! `skipped` outcomes with a closed reason set, unexpected extractor errors
//! become `failed` outcomes, and only the two scanner-level directory
//! errors reach the caller as hard failures.

#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod extractors;
pub mod types;

pub use error::{Error, Result};
pub use types::*;

pub use crate::core::config::LoaderConfig;
pub use crate::core::orchestrator::{load_directory, load_directory_sync, DirectoryLoader};
pub use crate::core::pipeline::MAX_FILE_SIZE_BYTES;
pub use crate::core::scanner::{scan_files, ScanOutcome};

pub use extractors::{ExtractorRegistry, RegistryLookup, TextExtractor};
