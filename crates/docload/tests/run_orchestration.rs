//! End-to-end run orchestration tests.
//!
//! Validates the public run API over real directory trees: discovery,
//! fan-out, aggregation, progress events, and the counter invariants.

use docload::{
    load_directory, load_directory_sync, DirectoryLoader, ErrorEntry, LoaderConfig,
    ProgressEvent, ProgressKind, ProgressObserver,
};
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::sync::Arc;
use tempfile::tempdir;

mod helpers;

#[derive(Default)]
struct CollectingObserver {
    events: Mutex<Vec<ProgressEvent>>,
}

impl ProgressObserver for CollectingObserver {
    fn on_event(&self, event: &ProgressEvent) {
        self.events.lock().push(event.clone());
    }
}

fn sequential_config() -> LoaderConfig {
    LoaderConfig {
        parallel: false,
        ..Default::default()
    }
}

#[cfg(feature = "pdf")]
#[tokio::test]
async fn test_recursive_directory_walk() {
    let root = tempdir().unwrap();
    std::fs::write(root.path().join("file1.md"), "# Test\nExpected content").unwrap();

    let nested = root.path().join("nested").join("deep");
    std::fs::create_dir_all(&nested).unwrap();
    helpers::write_sample_pdf(&nested.join("file2.pdf"));

    let report = load_directory(root.path(), &sequential_config(), None)
        .await
        .unwrap();

    assert_eq!(report.documents.len(), 2, "errors: {:?}", report.errors);
    let sources: BTreeSet<String> = report
        .documents
        .iter()
        .map(|d| d.metadata.source.clone())
        .collect();
    assert!(sources.contains("file1.md"));
    assert!(sources.contains("nested/deep/file2.pdf"));
}

#[tokio::test]
async fn test_text_file_metadata() {
    let root = tempdir().unwrap();
    std::fs::write(root.path().join("test.txt"), "hello").unwrap();

    let report = load_directory(root.path(), &LoaderConfig::default(), None)
        .await
        .unwrap();

    assert_eq!(report.documents.len(), 1);
    let metadata = &report.documents[0].metadata;
    assert!(!metadata.source.is_empty());
    assert_eq!(metadata.file_type, "txt");
    assert_eq!(metadata.size_bytes, 5);
    assert!(
        chrono::DateTime::parse_from_rfc3339(&metadata.modified_at).is_ok(),
        "modified_at should be valid RFC 3339: {}",
        metadata.modified_at
    );
}

#[tokio::test]
async fn test_counter_invariants_mixed_corpus() {
    let root = tempdir().unwrap();
    std::fs::write(root.path().join("good.txt"), "content").unwrap();
    std::fs::write(root.path().join("also-good.md"), "# ok").unwrap();
    std::fs::write(root.path().join("empty.txt"), "").unwrap();
    std::fs::write(root.path().join("unknown.zzz"), "???").unwrap();
    std::fs::write(root.path().join("broken.json"), "{nope").unwrap();

    let report = load_directory(root.path(), &LoaderConfig::default(), None)
        .await
        .unwrap();

    assert_eq!(report.stats.total_files, 5);
    assert_eq!(
        report.stats.loaded + report.stats.failed,
        report.stats.total_files
    );
    assert_eq!(report.documents.len(), report.stats.loaded);
    assert_eq!(report.errors.len(), report.stats.failed);
    assert_eq!(report.stats.loaded, 2);
    assert_eq!(report.stats.failed, 3);
}

#[tokio::test]
async fn test_sequential_and_parallel_same_outcome_sets() {
    let root = tempdir().unwrap();
    for i in 0..12 {
        std::fs::write(root.path().join(format!("doc{i}.txt")), format!("text {i}")).unwrap();
    }
    std::fs::write(root.path().join("skipme.bin"), "binary").unwrap();
    std::fs::write(root.path().join("bad.json"), "{broken").unwrap();
    let nested = root.path().join("inner");
    std::fs::create_dir(&nested).unwrap();
    std::fs::write(nested.join("nested.md"), "# nested").unwrap();

    let sequential = load_directory(root.path(), &sequential_config(), None)
        .await
        .unwrap();
    let parallel_config = LoaderConfig {
        max_workers: 3,
        ..Default::default()
    };
    let parallel = load_directory(root.path(), &parallel_config, None)
        .await
        .unwrap();

    let doc_set = |report: &docload::LoadReport| -> BTreeSet<(String, String)> {
        report
            .documents
            .iter()
            .map(|d| (d.metadata.source.clone(), d.page_content.clone()))
            .collect()
    };
    let error_set = |report: &docload::LoadReport| -> BTreeSet<ErrorEntry> {
        report.errors.iter().cloned().collect()
    };

    assert_eq!(doc_set(&sequential), doc_set(&parallel));
    assert_eq!(
        error_set(&sequential).len(),
        error_set(&parallel).len()
    );
    assert_eq!(
        error_set(&sequential)
            .iter()
            .map(|e| e.path.clone())
            .collect::<BTreeSet<_>>(),
        error_set(&parallel)
            .iter()
            .map(|e| e.path.clone())
            .collect::<BTreeSet<_>>()
    );
    assert_eq!(sequential.stats.loaded, parallel.stats.loaded);
    assert_eq!(sequential.stats.failed, parallel.stats.failed);
}

#[tokio::test]
async fn test_progress_event_sequence() {
    let root = tempdir().unwrap();
    std::fs::write(root.path().join("a.txt"), "a").unwrap();
    std::fs::write(root.path().join("b.bin"), "b").unwrap();
    std::fs::write(root.path().join("c.txt"), "c").unwrap();

    let observer = Arc::new(CollectingObserver::default());
    let report = load_directory(
        root.path(),
        &LoaderConfig::default(),
        Some(observer.clone() as Arc<dyn ProgressObserver>),
    )
    .await
    .unwrap();

    let events = observer.events.lock();
    assert_eq!(events.len(), 4, "scan_complete + one event per file");

    // scan_complete leads with total fixed and all counts zero
    assert_eq!(events[0].kind, ProgressKind::ScanComplete);
    assert_eq!(events[0].total, 3);
    assert_eq!(events[0].current, 0);
    assert_eq!(events[0].loaded, 0);
    assert_eq!(events[0].failed, 0);

    // per-file events carry monotonic counters
    for (i, event) in events.iter().skip(1).enumerate() {
        assert_eq!(event.current, i + 1);
        assert_eq!(event.total, 3);
        assert!(event.loaded + event.failed == event.current);
        assert!(!event.current_file.is_empty());
    }

    let last = events.last().unwrap();
    assert_eq!(last.current, report.stats.total_files);
    assert_eq!(last.loaded, report.stats.loaded);
    assert_eq!(last.failed, report.stats.failed);
}

#[tokio::test]
async fn test_no_observer_same_results() {
    let root = tempdir().unwrap();
    std::fs::write(root.path().join("a.txt"), "alpha").unwrap();
    std::fs::write(root.path().join("b.txt"), "beta").unwrap();

    let observer = Arc::new(CollectingObserver::default());
    let with_observer = load_directory(
        root.path(),
        &LoaderConfig::default(),
        Some(observer as Arc<dyn ProgressObserver>),
    )
    .await
    .unwrap();
    let without_observer = load_directory(root.path(), &LoaderConfig::default(), None)
        .await
        .unwrap();

    assert_eq!(with_observer.stats.loaded, without_observer.stats.loaded);
    assert_eq!(with_observer.stats.failed, without_observer.stats.failed);
}

#[tokio::test]
async fn test_non_recursive_mode() {
    let root = tempdir().unwrap();
    std::fs::write(root.path().join("top.txt"), "top").unwrap();
    let nested = root.path().join("sub");
    std::fs::create_dir(&nested).unwrap();
    std::fs::write(nested.join("inner.txt"), "inner").unwrap();

    let config = LoaderConfig {
        recursive: false,
        ..Default::default()
    };
    let report = load_directory(root.path(), &config, None).await.unwrap();

    assert_eq!(report.stats.total_files, 1);
    assert_eq!(report.documents[0].metadata.source, "top.txt");
}

#[test]
fn test_sync_wrapper_end_to_end() {
    let root = tempdir().unwrap();
    std::fs::write(root.path().join("sync.md"), "# sync run").unwrap();

    let report = load_directory_sync(root.path(), &LoaderConfig::default(), None).unwrap();
    assert_eq!(report.stats.loaded, 1);
    assert_eq!(report.documents[0].metadata.file_type, "md");
}

#[tokio::test]
async fn test_report_serializes_to_documented_shape() {
    let root = tempdir().unwrap();
    std::fs::write(root.path().join("doc.txt"), "payload").unwrap();
    std::fs::write(root.path().join("odd.zzz"), "x").unwrap();

    let report = load_directory(root.path(), &LoaderConfig::default(), None)
        .await
        .unwrap();
    let value = serde_json::to_value(&report).unwrap();

    assert!(value["documents"].is_array());
    assert!(value["errors"].is_array());
    assert_eq!(value["stats"]["total_files"], 2);
    assert_eq!(value["documents"][0]["metadata"]["file_type"], "txt");
    assert_eq!(value["errors"][0]["reason"], "unsupported_format");
    assert_eq!(value["errors"][0]["error"], "");
}

#[tokio::test]
async fn test_loader_reusable_across_runs() {
    let root = tempdir().unwrap();
    std::fs::write(root.path().join("one.txt"), "1").unwrap();

    let loader = DirectoryLoader::new(root.path(), LoaderConfig::default()).unwrap();
    let first = loader.load(None).await.unwrap();
    assert_eq!(first.stats.loaded, 1);

    std::fs::write(root.path().join("two.txt"), "2").unwrap();
    let second = loader.load(None).await.unwrap();
    assert_eq!(second.stats.total_files, 2);
    assert_eq!(second.stats.loaded, 2);
}
