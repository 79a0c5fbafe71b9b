//! docload command-line interface.
//!
//! Thin presentation layer over the library's run API: parses arguments,
//! installs the log subscriber, renders progress, and emits the report.

use anyhow::{Context, Result};
use clap::Parser;
use docload::{
    load_directory, LoaderConfig, ProgressEvent, ProgressKind, ProgressObserver,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "docload",
    about = "Ingest a directory of documents into (text, metadata) records",
    version
)]
struct Cli {
    /// Directory to ingest
    directory: PathBuf,

    /// Only enumerate direct children of the directory
    #[arg(long)]
    no_recursive: bool,

    /// Process files one at a time instead of using the worker pool
    #[arg(long)]
    sequential: bool,

    /// Worker pool size (0 = one worker per CPU core)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Load configuration from this TOML file instead of discovery
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print one line per processed file to stderr
    #[arg(short, long)]
    progress: bool,

    /// Print the full JSON report to stdout instead of a summary
    #[arg(long)]
    json: bool,

    /// Write the full JSON report to a file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose logging (info/debug to stderr)
    #[arg(short, long)]
    verbose: bool,
}

/// Per-file progress lines on stderr.
struct ConsoleProgress;

impl ProgressObserver for ConsoleProgress {
    fn on_event(&self, event: &ProgressEvent) {
        match event.kind {
            ProgressKind::ScanComplete => {
                eprintln!("scan complete: {} files", event.total);
            }
            ProgressKind::Loaded => {
                eprintln!(
                    "[{}/{}] loaded  {}",
                    event.current, event.total, event.current_file
                );
            }
            ProgressKind::Skipped => {
                eprintln!(
                    "[{}/{}] skipped {} ({})",
                    event.current,
                    event.total,
                    event.current_file,
                    event.message.as_deref().unwrap_or("")
                );
            }
            ProgressKind::Failed => {
                eprintln!(
                    "[{}/{}] FAILED  {} ({})",
                    event.current,
                    event.total,
                    event.current_file,
                    event.message.as_deref().unwrap_or("")
                );
            }
        }
    }
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "docload=debug" } else { "docload=warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(cli: &Cli) -> Result<LoaderConfig> {
    let mut config = match &cli.config {
        Some(path) => LoaderConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => LoaderConfig::discover()
            .context("config discovery failed")?
            .unwrap_or_default(),
    };

    if cli.no_recursive {
        config.recursive = false;
    }
    if cli.sequential {
        config.parallel = false;
    }
    if let Some(workers) = cli.workers {
        config.max_workers = workers;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = resolve_config(&cli)?;
    info!(
        "loading directory {} (recursive={}, workers={})",
        cli.directory.display(),
        config.recursive,
        config.workers()
    );

    let observer: Option<Arc<dyn ProgressObserver>> = if cli.progress {
        Some(Arc::new(ConsoleProgress))
    } else {
        None
    };

    let report = load_directory(&cli.directory, &config, observer)
        .await
        .with_context(|| format!("failed to load {}", cli.directory.display()))?;

    if let Some(path) = &cli.output {
        let file = std::fs::File::create(path)
            .with_context(|| format!("cannot create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &report)?;
        eprintln!("report written to {}", path.display());
    }

    if cli.json {
        serde_json::to_writer_pretty(std::io::stdout().lock(), &report)?;
        println!();
    } else {
        println!(
            "{} files scanned, {} loaded, {} failed/skipped in {}s",
            report.stats.total_files,
            report.stats.loaded,
            report.stats.failed,
            report.stats.duration_seconds
        );
        for entry in &report.errors {
            let detail = if entry.reason.is_empty() {
                entry.error.as_str()
            } else {
                entry.reason.as_str()
            };
            println!("  {}: {}", entry.path, detail);
        }
    }

    Ok(())
}
