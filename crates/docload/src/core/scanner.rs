//! File discovery.
//!
//! Enumerates candidate files under a root before any extraction happens.
//! Hidden entries (dot-prefixed names) are excluded outright. Symlinked
//! files and directories are filtered here, at discovery time: they are
//! logged as skips but never reach the pipeline and never appear in the
//! per-file error list.

use crate::{Error, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Sentinel histogram key for files without an extension.
pub const NO_EXTENSION: &str = "no_ext";

/// Result of the discovery phase.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Discovered files, in deterministic traversal order (entries sorted
    /// by name within each directory).
    pub paths: Vec<PathBuf>,
    /// Lowercased extension (with dot, or [`NO_EXTENSION`]) to count.
    pub extensions: BTreeMap<String, usize>,
}

/// Enumerate candidate files under `root`.
///
/// # Errors
///
/// `Error::DirectoryNotFound` if `root` does not exist,
/// `Error::NotADirectory` if it is not a directory. Both abort the run
/// before any file is processed.
pub fn scan_files(root: &Path, recursive: bool) -> Result<ScanOutcome> {
    if !root.exists() {
        return Err(Error::DirectoryNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(Error::NotADirectory(root.to_path_buf()));
    }

    let mut outcome = ScanOutcome::default();
    visit_dir(root, recursive, &mut outcome);
    Ok(outcome)
}

fn visit_dir(dir: &Path, recursive: bool, outcome: &mut ScanOutcome) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("event=dir_skipped path={} error={}", dir.display(), e);
            return;
        }
    };

    let mut paths: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
    paths.sort();

    for path in paths {
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };

        if name.starts_with('.') {
            continue;
        }

        if path.is_symlink() {
            warn!(
                "event=file_skipped path={} reason=symlink_unsupported",
                path.display()
            );
            continue;
        }

        if path.is_dir() {
            if recursive {
                visit_dir(&path, recursive, outcome);
            }
        } else if path.is_file() {
            let ext = extension_key(&path);
            *outcome.extensions.entry(ext).or_insert(0) += 1;
            outcome.paths.push(path);
        }
    }
}

/// Histogram key for a path: lowercased extension with dot, or the
/// [`NO_EXTENSION`] sentinel.
pub fn extension_key(path: &Path) -> String {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() => format!(".{}", ext.to_lowercase()),
        _ => NO_EXTENSION.to_string(),
    }
}
