mod app;
mod renderer;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use folio_core::{PortfolioConfig, Scheduler};
use tracing_subscriber::EnvFilter;

use crate::app::PortfolioTui;

/// Browse a developer portfolio in the terminal.
#[derive(Debug, Parser)]
#[command(name = "folio", version, about)]
struct Args {
    /// Portfolio config (JSON). Defaults to the built-in sample portfolio.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs here; the terminal itself belongs to the UI.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))
}

fn load_config(path: Option<&PathBuf>) -> Result<PortfolioConfig> {
    let Some(path) = path else {
        return Ok(PortfolioConfig::default());
    };
    let data = std::fs::read(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    PortfolioConfig::from_json(&data)
        .with_context(|| format!("invalid config {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let config = load_config(args.config.as_ref())?;
    let scheduler = Scheduler::new();
    PortfolioTui::new(config, &scheduler)?.run()
}
