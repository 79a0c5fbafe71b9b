//! Thread-safe outcome aggregation and progress reporting.
//!
//! One mutex guards all shared run state; each outcome is applied in a
//! single critical section and the matching progress event is delivered
//! inside it, so an observer never sees interleaved partial updates. The
//! lock is only ever held for that bookkeeping, never across extraction
//! work.

use crate::types::{
    Document, ErrorEntry, LoadReport, ProcessOutcome, ProgressEvent, ProgressKind,
    ProgressObserver, RunStats,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

/// How many recent per-file outcomes are retained for incremental
/// observers, independent of the unbounded error list.
pub const RECENT_LOG_LIMIT: usize = 10;

/// One entry of the bounded trailing log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentEntry {
    pub path: String,
    pub kind: ProgressKind,
    pub message: Option<String>,
}

#[derive(Default)]
struct AggregatorState {
    processed: usize,
    loaded: usize,
    failed: usize,
    documents: Vec<Document>,
    errors: Vec<ErrorEntry>,
    recent: VecDeque<RecentEntry>,
}

/// Mutually exclusive accumulator for one run.
///
/// Created at run start, frozen into a [`LoadReport`] by [`finish`].
/// `total` is fixed at scan completion and never changes afterwards.
///
/// [`finish`]: RunAggregator::finish
pub struct RunAggregator {
    total: usize,
    started: Instant,
    state: Mutex<AggregatorState>,
    observer: Option<Arc<dyn ProgressObserver>>,
}

impl RunAggregator {
    /// Create an aggregator for a scan of `total` files and emit the
    /// `scan_complete` event with all counts at zero.
    pub fn new(total: usize, observer: Option<Arc<dyn ProgressObserver>>) -> Self {
        let aggregator = Self {
            total,
            started: Instant::now(),
            state: Mutex::new(AggregatorState::default()),
            observer,
        };

        aggregator.emit(ProgressEvent {
            current: 0,
            total,
            loaded: 0,
            failed: 0,
            current_file: String::new(),
            kind: ProgressKind::ScanComplete,
            message: None,
        });

        aggregator
    }

    /// Apply one terminal outcome: update counters, append to the
    /// document/error lists and the recent log, and deliver the progress
    /// event, all in one critical section.
    pub fn apply(&self, outcome: ProcessOutcome) {
        let mut state = self.state.lock();
        state.processed += 1;

        let (path, kind, message) = match outcome {
            ProcessOutcome::Success(document) => {
                state.loaded += 1;
                let path = document.metadata.source.clone();
                state.documents.push(document);
                (path, ProgressKind::Loaded, None)
            }
            ProcessOutcome::Skipped {
                source,
                reason,
                detail,
            } => {
                state.failed += 1;
                state.errors.push(ErrorEntry {
                    path: source.clone(),
                    reason: reason.as_str().to_string(),
                    error: String::new(),
                });
                let message = detail.or_else(|| Some(reason.as_str().to_string()));
                (source, ProgressKind::Skipped, message)
            }
            ProcessOutcome::Failed { source, message } => {
                state.failed += 1;
                state.errors.push(ErrorEntry {
                    path: source.clone(),
                    reason: String::new(),
                    error: message.clone(),
                });
                (source, ProgressKind::Failed, Some(message))
            }
        };

        state.recent.push_back(RecentEntry {
            path: path.clone(),
            kind,
            message: message.clone(),
        });
        while state.recent.len() > RECENT_LOG_LIMIT {
            state.recent.pop_front();
        }

        let event = ProgressEvent {
            current: state.processed,
            total: self.total,
            loaded: state.loaded,
            failed: state.failed,
            current_file: path,
            kind,
            message,
        };

        // Delivered under the lock so observers see monotonic counters.
        if let Some(observer) = &self.observer {
            observer.on_event(&event);
        }
    }

    /// Snapshot of the bounded trailing log.
    pub fn recent(&self) -> Vec<RecentEntry> {
        self.state.lock().recent.iter().cloned().collect()
    }

    /// Number of outcomes applied so far.
    pub fn processed(&self) -> usize {
        self.state.lock().processed
    }

    /// Freeze the run into its final report.
    pub fn finish(self) -> LoadReport {
        let state = self.state.into_inner();
        let duration = self.started.elapsed().as_secs_f64();

        LoadReport {
            documents: state.documents,
            errors: state.errors,
            stats: RunStats {
                total_files: self.total,
                loaded: state.loaded,
                failed: state.failed,
                duration_seconds: (duration * 1000.0).round() / 1000.0,
            },
        }
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(observer) = &self.observer {
            observer.on_event(&event);
        }
    }
}
