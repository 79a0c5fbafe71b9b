//! Core run orchestration.
//!
//! Everything between "here is a root directory" and "here is your report"
//! lives in this module:
//!
//! - **Scanner**: file discovery with hidden/symlink filters and the
//!   extension histogram
//! - **Pipeline**: the per-file validate → extract → package state machine
//! - **Orchestrator**: sequential or bounded-parallel execution over the
//!   discovered paths
//! - **Aggregator**: thread-safe counters, result lists, and the progress
//!   channel
//! - **Config**: loader configuration and TOML loading

pub mod aggregator;
pub mod config;
pub mod orchestrator;
pub mod pipeline;
pub mod scanner;

pub use aggregator::{RecentEntry, RunAggregator, RECENT_LOG_LIMIT};
pub use config::LoaderConfig;
pub use orchestrator::{load_directory, load_directory_sync, DirectoryLoader};
pub use pipeline::{process_file, MAX_FILE_SIZE_BYTES};
pub use scanner::{scan_files, ScanOutcome, NO_EXTENSION};
