mod book;
mod config;
mod errors;
mod html;
mod layout;
mod models;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::book::assemble_books;
use crate::config::Config;
use crate::errors::AppError;
use crate::layout::TextMetricsProber;
use crate::models::{Book, Presentation};

/// Assembles per-presenter briefing books from a presentation collection.
#[derive(Debug, Parser)]
#[command(name = "briefbook", version)]
struct Cli {
    /// Path to the presentations JSON collection
    #[arg(long)]
    input: PathBuf,

    /// Path for the assembled books JSON (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    // Load configuration first so the log filter default is available.
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting briefbook v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let presentations = load_presentations(&cli.input)?;
    info!(count = presentations.len(), "loaded presentation records");

    let prober = TextMetricsProber::new(config.text_style());
    let books = assemble_books(&presentations, &config.geometry(), &prober);

    write_books(&books, cli.output.as_deref(), cli.compact)?;
    if let Some(path) = &cli.output {
        info!(path = %path.display(), "wrote assembled books");
    }

    Ok(())
}

fn load_presentations(path: &Path) -> Result<Vec<Presentation>, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn write_books(books: &[Book], output: Option<&Path>, compact: bool) -> Result<(), AppError> {
    let json = if compact {
        serde_json::to_string(books)?
    } else {
        serde_json::to_string_pretty(books)?
    };
    match output {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
