//! Configuration loading and management.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Loader configuration.
///
/// Can be loaded from a `docload.toml` file or created programmatically.
///
/// # Example
///
/// ```rust
/// use docload::LoaderConfig;
///
/// let config = LoaderConfig::default();
/// assert!(config.recursive);
/// assert_eq!(config.max_workers, 4);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Descend into subdirectories.
    #[serde(default = "default_true")]
    pub recursive: bool,

    /// Use the bounded worker pool. When false (or when there is at most
    /// one file) processing is sequential.
    #[serde(default = "default_true")]
    pub parallel: bool,

    /// Worker pool size. `0` means one worker per CPU core.
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
}

fn default_true() -> bool {
    true
}

fn default_max_workers() -> usize {
    4
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            recursive: true,
            parallel: true,
            max_workers: default_max_workers(),
        }
    }
}

impl LoaderConfig {
    /// The effective worker count: `max_workers`, or the CPU count when
    /// `max_workers` is 0.
    pub fn workers(&self) -> usize {
        if self.max_workers == 0 {
            num_cpus::get()
        } else {
            self.max_workers
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            Error::config_with_source(format!("Invalid config file {}: {}", path.display(), e), e)
        })
    }

    /// Discover a `docload.toml` in the current directory or any parent.
    ///
    /// Returns `Ok(None)` when no config file exists.
    pub fn discover() -> Result<Option<Self>> {
        let mut current = std::env::current_dir()?;
        loop {
            let candidate = current.join("docload.toml");
            if candidate.exists() {
                return Ok(Some(Self::from_toml_file(candidate)?));
            }
            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Ok(None),
            }
        }
    }
}
