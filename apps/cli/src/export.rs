//! The export pipeline: schema, configuration, records, package.

use crate::db::{CollectionRepository, DbError, NoteRepository, SqliteRepository};
use crate::error::{ExportError, Result};
use crate::package::{self, COLLECTION_ENTRY};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use vocadeck_core::{encode_items, vocabulary_note_type, CollectionConfig, IdSeed, NoteType, VocabularyItem};

/// Caller-controlled export settings.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Display name of the working deck.
    pub deck_name: String,
    /// Base for note and card ids. Derived from `now` when unset.
    pub id_seed: Option<IdSeed>,
    /// Timestamp written to every row. Current time when unset.
    pub now: Option<DateTime<Utc>>,
}

impl ExportOptions {
    pub fn new(deck_name: impl Into<String>) -> Self {
        Self {
            deck_name: deck_name.into(),
            id_seed: None,
            now: None,
        }
    }

    pub fn with_id_seed(mut self, seed: IdSeed) -> Self {
        self.id_seed = Some(seed);
        self
    }

    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }
}

/// What an export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub notes: usize,
    pub cards: usize,
    pub output: PathBuf,
}

/// Encode `items` into a package at `output`.
///
/// The collection is built in a scratch directory owned by this call and
/// removed when it returns. On error nothing is written to `output`.
pub fn generate_apkg(
    items: &[VocabularyItem],
    output: &Path,
    options: &ExportOptions,
) -> Result<ExportSummary> {
    let now = options.now.unwrap_or_else(Utc::now);
    let seed = options.id_seed.unwrap_or_else(|| IdSeed::from_time(now));

    tracing::info!(
        "Generating deck \"{}\" with {} items into {}",
        options.deck_name,
        items.len(),
        output.display()
    );

    let scratch = tempfile::Builder::new()
        .prefix("vocadeck-")
        .tempdir()
        .map_err(ExportError::Setup)?;
    let db_path = scratch.path().join(COLLECTION_ENTRY);

    let repo = SqliteRepository::open(&db_path).map_err(ExportError::OpenDatabase)?;
    repo.create_schema().map_err(ExportError::Schema)?;
    tracing::debug!("Created schema in {}", db_path.display());

    let note_type = vocabulary_note_type();
    write_configuration(&repo, &note_type, &options.deck_name, now)
        .map_err(ExportError::Configuration)?;

    let encoded = encode_items(items, &note_type, seed, now).map_err(ExportError::Ids)?;
    repo.insert_notes(&encoded).map_err(ExportError::Records)?;
    let notes = repo.count_notes().map_err(ExportError::Records)?;
    let cards = repo.count_cards().map_err(ExportError::Records)?;
    repo.close().map_err(ExportError::Records)?;
    tracing::debug!("Inserted {} notes and {} cards", notes, cards);

    let collection = fs::read(&db_path).map_err(|e| ExportError::Package(e.into()))?;
    package::write_package(output, &collection)?;

    tracing::info!("Deck saved to {}", output.display());
    Ok(ExportSummary {
        notes,
        cards,
        output: output.to_path_buf(),
    })
}

fn write_configuration(
    repo: &SqliteRepository,
    note_type: &NoteType,
    deck_name: &str,
    now: DateTime<Utc>,
) -> std::result::Result<(), DbError> {
    note_type.validate()?;
    let blobs = CollectionConfig::new(deck_name, note_type, now).to_blobs()?;
    repo.write_collection(&blobs, now)
}
