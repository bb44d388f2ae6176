//! Command-line and environment configuration.

use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Convert a vocabulary list into an importable flashcard package.
#[derive(Debug, Parser)]
#[command(name = "vocadeck", version, about)]
pub struct Config {
    /// Vocabulary JSON file, or `-` for stdin.
    pub input: PathBuf,

    /// Output package path.
    #[arg(short, long, env = "VOCADECK_OUTPUT", default_value = "deck.apkg")]
    pub output: PathBuf,

    /// Deck name shown in the flashcard application. Defaults to the output
    /// file name without its extension.
    #[arg(short, long, env = "VOCADECK_DECK_NAME")]
    pub deck_name: Option<String>,
}

impl Config {
    /// Deck name to use for this run.
    pub fn deck_name(&self) -> String {
        match &self.deck_name {
            Some(name) => name.clone(),
            None => deck_name_from_path(&self.output),
        }
    }

    /// Read the vocabulary file content.
    pub fn read_input(&self) -> std::io::Result<String> {
        if self.input == Path::new("-") {
            let mut content = String::new();
            std::io::stdin().read_to_string(&mut content)?;
            Ok(content)
        } else {
            std::fs::read_to_string(&self.input)
        }
    }
}

/// File stem of `path`, e.g. `out/english.apkg` -> `english`.
pub fn deck_name_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "Vocabulary".to_string())
}
