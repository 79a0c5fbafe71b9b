//! Run orchestration: discovery, fan-out, collection.
//!
//! Runs the per-file pipeline for every discovered path, either serially or
//! on a bounded worker pool, and streams outcomes into the aggregator in
//! completion order. Both modes produce the same outcome set; only the
//! observable order differs.

use crate::core::aggregator::RunAggregator;
use crate::core::config::LoaderConfig;
use crate::core::pipeline::process_file;
use crate::core::scanner::scan_files;
use crate::extractors::ExtractorRegistry;
use crate::types::{LoadReport, ProcessOutcome, ProgressObserver};
use crate::Result;
use ahash::AHashMap;
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info};

/// Global Tokio runtime backing the synchronous wrappers.
///
/// Lazily initialized on first use and shared across all sync calls; the
/// multi-thread scheduler is what gives the worker pool OS-level
/// parallelism.
static GLOBAL_RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create global Tokio runtime - system may be out of resources")
});

/// Loads every supported document under a root directory.
///
/// # Example
///
/// ```rust,no_run
/// use docload::{DirectoryLoader, LoaderConfig};
///
/// # async fn example() -> docload::Result<()> {
/// let loader = DirectoryLoader::new("./corpus", LoaderConfig::default())?;
/// let report = loader.load(None).await?;
/// println!("loaded {} documents", report.stats.loaded);
/// # Ok(())
/// # }
/// ```
pub struct DirectoryLoader {
    root: PathBuf,
    config: LoaderConfig,
    registry: Arc<ExtractorRegistry>,
}

impl DirectoryLoader {
    /// Create a loader with the default extractor registry.
    pub fn new(root: impl AsRef<Path>, config: LoaderConfig) -> Result<Self> {
        Ok(Self::with_registry(
            root,
            config,
            Arc::new(ExtractorRegistry::with_defaults()?),
        ))
    }

    /// Create a loader with an injected registry.
    pub fn with_registry(
        root: impl AsRef<Path>,
        config: LoaderConfig,
        registry: Arc<ExtractorRegistry>,
    ) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            config,
            registry,
        }
    }

    /// The scan root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run one end-to-end load.
    ///
    /// Fails only for the two scanner-level directory errors; every
    /// per-file problem is captured in the returned error list.
    pub async fn load(
        &self,
        observer: Option<Arc<dyn ProgressObserver>>,
    ) -> Result<LoadReport> {
        info!(
            "event=scan_start directory={} recursive={}",
            self.root.display(),
            self.config.recursive
        );

        let scan = scan_files(&self.root, self.config.recursive)?;
        let total_files = scan.paths.len();
        info!(
            "event=files_found total={} extensions={:?}",
            total_files, scan.extensions
        );

        let aggregator = RunAggregator::new(total_files, observer);

        if self.config.parallel && total_files > 1 {
            self.run_parallel(scan.paths, &aggregator).await;
        } else {
            self.run_sequential(scan.paths, &aggregator).await;
        }

        let report = aggregator.finish();
        info!(
            "event=load_complete documents={} duration={}s failed={}",
            report.stats.loaded, report.stats.duration_seconds, report.stats.failed
        );
        Ok(report)
    }

    async fn run_sequential(&self, paths: Vec<PathBuf>, aggregator: &RunAggregator) {
        for path in paths {
            let outcome = process_file(&path, &self.root, &self.registry).await;
            aggregator.apply(outcome);
        }
    }

    /// Fan out to a fixed-size pool; outcomes are collected as each task
    /// completes, independent of submission order. Excess files queue on
    /// the semaphore.
    async fn run_parallel(&self, paths: Vec<PathBuf>, aggregator: &RunAggregator) {
        let semaphore = Arc::new(Semaphore::new(self.config.workers().max(1)));
        let mut tasks: JoinSet<ProcessOutcome> = JoinSet::new();
        let mut sources: AHashMap<tokio::task::Id, String> = AHashMap::new();

        for path in paths {
            let root = self.root.clone();
            let registry = Arc::clone(&self.registry);
            let semaphore = Arc::clone(&semaphore);
            let source = crate::core::pipeline::relative_source(&path, &root);

            let handle = tasks.spawn(async move {
                let _permit = semaphore
                    .acquire()
                    .await
                    .expect("run-scoped semaphore is never closed");
                process_file(&path, &root, &registry).await
            });
            sources.insert(handle.id(), source);
        }

        while let Some(task_result) = tasks.join_next_with_id().await {
            match task_result {
                Ok((id, outcome)) => {
                    sources.remove(&id);
                    aggregator.apply(outcome);
                }
                Err(join_err) => {
                    // One worker's panic must not abort the batch; attribute
                    // it to its file and keep draining.
                    let source = sources.remove(&join_err.id()).unwrap_or_default();
                    error!(
                        "event=worker_panicked path={} error={}",
                        source, join_err
                    );
                    aggregator.apply(ProcessOutcome::Failed {
                        source,
                        message: format!("worker task panicked: {join_err}"),
                    });
                }
            }
        }
    }
}

/// Load every supported document under `root`.
///
/// Convenience entry point constructing a [`DirectoryLoader`] with the
/// default registry.
pub async fn load_directory(
    root: impl AsRef<Path>,
    config: &LoaderConfig,
    observer: Option<Arc<dyn ProgressObserver>>,
) -> Result<LoadReport> {
    DirectoryLoader::new(root, config.clone())?.load(observer).await
}

/// Synchronous wrapper for [`load_directory`].
///
/// Blocks on the shared global runtime; for async code use
/// [`load_directory`] directly.
pub fn load_directory_sync(
    root: impl AsRef<Path>,
    config: &LoaderConfig,
    observer: Option<Arc<dyn ProgressObserver>>,
) -> Result<LoadReport> {
    GLOBAL_RUNTIME.block_on(load_directory(root, config, observer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_load_missing_root_fails() {
        let loader = DirectoryLoader::new("/nonexistent/root", LoaderConfig::default()).unwrap();
        let result = loader.load(None).await;
        assert!(matches!(result, Err(Error::DirectoryNotFound(_))));
    }

    #[tokio::test]
    async fn test_load_file_root_fails() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("f.txt");
        std::fs::write(&file, "x").unwrap();

        let loader = DirectoryLoader::new(&file, LoaderConfig::default()).unwrap();
        let result = loader.load(None).await;
        assert!(matches!(result, Err(Error::NotADirectory(_))));
    }

    #[tokio::test]
    async fn test_empty_directory_loads_nothing() {
        let dir = tempdir().unwrap();
        let loader = DirectoryLoader::new(dir.path(), LoaderConfig::default()).unwrap();
        let report = loader.load(None).await.unwrap();

        assert_eq!(report.stats.total_files, 0);
        assert_eq!(report.stats.loaded, 0);
        assert_eq!(report.stats.failed, 0);
        assert!(report.documents.is_empty());
        assert!(report.errors.is_empty());
    }

    #[tokio::test]
    async fn test_single_file_runs_sequentially() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("only.txt"), "single").unwrap();

        let loader = DirectoryLoader::new(dir.path(), LoaderConfig::default()).unwrap();
        let report = loader.load(None).await.unwrap();
        assert_eq!(report.stats.loaded, 1);
        assert_eq!(report.documents[0].metadata.source, "only.txt");
    }

    #[test]
    fn test_sync_wrapper() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("sync.txt"), "from sync").unwrap();

        let report =
            load_directory_sync(dir.path(), &LoaderConfig::default(), None).unwrap();
        assert_eq!(report.stats.loaded, 1);
        assert_eq!(report.documents[0].page_content, "from sync");
    }

    #[tokio::test]
    async fn test_more_files_than_workers_all_complete() {
        let dir = tempdir().unwrap();
        for i in 0..25 {
            std::fs::write(dir.path().join(format!("f{i}.txt")), format!("c{i}")).unwrap();
        }

        let config = LoaderConfig {
            max_workers: 2,
            ..Default::default()
        };
        let loader = DirectoryLoader::new(dir.path(), config).unwrap();
        let report = loader.load(None).await.unwrap();

        assert_eq!(report.stats.total_files, 25);
        assert_eq!(report.stats.loaded, 25);
        assert_eq!(report.stats.failed, 0);
    }
}
