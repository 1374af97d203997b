//! # shapefinder
//!
//! Command-line front end: flags in, matching instance types out.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  argv ──► Args ──► FilterSpecification ─┐                               │
//! │                                         ▼                               │
//! │  shapefinder.toml + env ──► SelectorConfig ──► Selector ──► formatter   │
//! │                                         ▲                   │           │
//! │  catalog.json ──► SnapshotProvider ─────┘                   ▼           │
//! │                                                           stdout        │
//! │                                                                         │
//! │  Logs go to stderr (RUST_LOG, default "warn").                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod args;

use anyhow::{Context, Result};
use clap::Parser;
use shapefinder_selector::{Selector, SelectorConfig, SnapshotProvider};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::args::Args;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    // An explicit config file must load; the default location is best-effort.
    let config = match args.config.clone() {
        Some(path) => SelectorConfig::load(Some(path)).context("loading config file")?,
        None => SelectorConfig::load_or_default(None),
    };

    let catalog = args
        .catalog
        .clone()
        .or_else(|| config.catalog.snapshot_path.clone())
        .context("no catalog snapshot given; pass --catalog or set catalog.snapshot_path")?;
    let provider = SnapshotProvider::load(&catalog)
        .with_context(|| format!("reading catalog snapshot {}", catalog.display()))?;

    let spec = args.filter_spec();
    let format = args.output.unwrap_or(config.output.format);
    debug!(?spec, %format, "Running selection");

    let selector = Selector::new(provider, &config);
    let lines = selector.filter_with_output(&spec, format.formatter()).await?;
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Per-page and per-rejection detail
/// - `RUST_LOG=shapefinder_selector=info` - Selection start/finish only
/// - Default: WARN level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
