pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod package;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use config::Config;
pub use error::{ExportError, ExportStage};
pub use export::{generate_apkg, ExportOptions, ExportSummary};

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::parse();

    tracing::info!("Reading vocabulary from {}", config.input.display());
    let content = config
        .read_input()
        .with_context(|| format!("failed to read {}", config.input.display()))?;
    let items = vocadeck_core::parse(&content)
        .with_context(|| format!("failed to parse {}", config.input.display()))?;

    if items.is_empty() {
        tracing::warn!("Vocabulary list is empty; writing a deck without cards");
    }

    let options = ExportOptions::new(config.deck_name());
    let summary = generate_apkg(&items, &config.output, &options).context("APKG generation failed")?;

    println!(
        "Deck saved to: {} ({} notes, {} cards)",
        summary.output.display(),
        summary.notes,
        summary.cards
    );
    Ok(())
}
