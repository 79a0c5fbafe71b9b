//! Per-format text extractors and the extension-keyed registry.
//!
//! Extractors are thin adapters over mature parsing crates behind one
//! narrow contract: a validated path in, plain text out. They perform no
//! size or existence validation (the pipeline's job) and return an empty
//! string rather than erroring when a file legitimately contains no text.
//!
//! The registry is immutable once built. [`ExtractorRegistry::with_defaults`]
//! registers every extractor compiled into this build; formats whose
//! extractor was compiled out via a cargo feature are recorded in an
//! unavailable table so lookups can distinguish "we know this format but the
//! dependency is absent" from "never heard of it". That construction-time
//! decision is the only place the distinction is made.

use crate::{Error, Result};
use ahash::AHashMap;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

pub mod csv;
pub mod structured;
pub mod text;

#[cfg(feature = "excel")]
pub mod excel;

#[cfg(feature = "html")]
pub mod html;

#[cfg(feature = "office")]
pub mod docx;

#[cfg(feature = "office")]
pub mod pptx;

#[cfg(feature = "pdf")]
pub mod pdf;

pub use csv::CsvExtractor;
pub use structured::JsonExtractor;
pub use text::{MarkdownExtractor, PlainTextExtractor};

#[cfg(feature = "excel")]
pub use excel::ExcelExtractor;

#[cfg(feature = "html")]
pub use html::HtmlExtractor;

#[cfg(feature = "office")]
pub use docx::DocxExtractor;

#[cfg(feature = "office")]
pub use pptx::PptxExtractor;

#[cfg(feature = "pdf")]
pub use pdf::PdfExtractor;

/// Contract between the core and a format extractor.
///
/// Extractors must be thread-safe (`Send + Sync`): the orchestrator invokes
/// them concurrently from multiple workers against a shared registry.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Unique name, lowercase with hyphens.
    fn name(&self) -> &str;

    /// Extensions this extractor handles, lowercase, including the dot.
    fn extensions(&self) -> &[&str];

    /// Extract the text content of `path`.
    ///
    /// Errors are captured by the pipeline as a `Failed` outcome and never
    /// abort the batch.
    async fn extract(&self, path: &Path) -> Result<String>;
}

/// Lookup answer for one extension.
pub enum RegistryLookup {
    Found(Arc<dyn TextExtractor>),
    /// The format is known but its extractor was not compiled in; the
    /// string names what is missing.
    MissingDependency(&'static str),
    Unsupported,
}

/// Immutable mapping from lowercase file extension to extractor.
///
/// Built once at startup and passed by reference into the orchestrator.
pub struct ExtractorRegistry {
    by_extension: AHashMap<String, Arc<dyn TextExtractor>>,
    unavailable: AHashMap<String, &'static str>,
}

impl ExtractorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            by_extension: AHashMap::new(),
            unavailable: AHashMap::new(),
        }
    }

    /// Build the registry with every extractor compiled into this build.
    ///
    /// Formats gated behind disabled cargo features are recorded as
    /// unavailable instead of silently vanishing, so their extensions
    /// resolve to `dependency_missing` rather than `unsupported_format`.
    pub fn with_defaults() -> Result<Self> {
        let mut registry = Self::new();

        registry.register(Arc::new(PlainTextExtractor::new()))?;
        registry.register(Arc::new(MarkdownExtractor::new()))?;
        registry.register(Arc::new(JsonExtractor::new()))?;
        registry.register(Arc::new(CsvExtractor::new()))?;

        #[cfg(feature = "html")]
        registry.register(Arc::new(HtmlExtractor::new()))?;

        #[cfg(feature = "excel")]
        registry.register(Arc::new(ExcelExtractor::new()))?;

        #[cfg(feature = "office")]
        {
            registry.register(Arc::new(DocxExtractor::new()))?;
            registry.register(Arc::new(PptxExtractor::new()))?;
        }

        #[cfg(feature = "pdf")]
        registry.register(Arc::new(PdfExtractor::new()))?;

        #[cfg(not(feature = "office"))]
        registry.mark_unavailable(".pptx", "pptx support (office feature)");

        Ok(registry)
    }

    /// Register an extractor under every extension it declares.
    ///
    /// Returns an error for a malformed extension (must be non-empty,
    /// lowercase, and start with a dot).
    pub fn register(&mut self, extractor: Arc<dyn TextExtractor>) -> Result<()> {
        for ext in extractor.extensions() {
            if !ext.starts_with('.') || ext.len() < 2 {
                return Err(Error::Other(format!(
                    "Extractor '{}' declares invalid extension '{}'",
                    extractor.name(),
                    ext
                )));
            }
            if ext.chars().any(|c| c.is_uppercase()) {
                return Err(Error::Other(format!(
                    "Extractor '{}' declares non-lowercase extension '{}'",
                    extractor.name(),
                    ext
                )));
            }
            self.by_extension.insert((*ext).to_string(), Arc::clone(&extractor));
        }
        Ok(())
    }

    /// Record an extension as known but unavailable in this build.
    pub fn mark_unavailable(&mut self, extension: &str, dependency: &'static str) {
        self.unavailable.insert(extension.to_string(), dependency);
    }

    /// Resolve an extension (lowercase, with dot) to an extractor.
    pub fn lookup(&self, extension: &str) -> RegistryLookup {
        if let Some(extractor) = self.by_extension.get(extension) {
            return RegistryLookup::Found(Arc::clone(extractor));
        }
        if let Some(dependency) = self.unavailable.get(extension) {
            return RegistryLookup::MissingDependency(dependency);
        }
        RegistryLookup::Unsupported
    }

    /// All registered extensions, sorted.
    pub fn extensions(&self) -> Vec<String> {
        let mut exts: Vec<String> = self.by_extension.keys().cloned().collect();
        exts.sort();
        exts
    }

    /// Number of registered extensions.
    pub fn len(&self) -> usize {
        self.by_extension.len()
    }

    /// Whether no extractor is registered.
    pub fn is_empty(&self) -> bool {
        self.by_extension.is_empty()
    }
}
