//! Repository pattern for collection database access.

use crate::db::error::DbError;
use crate::db::schema;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::Path;
use vocadeck_core::{CollectionBlobs, EncodedNote};

type Result<T> = std::result::Result<T, DbError>;

/// Repository for the collection row.
pub trait CollectionRepository {
    fn write_collection(&self, blobs: &CollectionBlobs, now: DateTime<Utc>) -> Result<()>;
}

/// Repository for note and card rows.
pub trait NoteRepository {
    /// Insert every note and its cards in one transaction.
    fn insert_notes(&self, notes: &[EncodedNote]) -> Result<usize>;
    fn count_notes(&self) -> Result<usize>;
    fn count_cards(&self) -> Result<usize>;
}

/// SQLite implementation of repositories.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Open database at path, creating the file if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Create all tables and indexes.
    pub fn create_schema(&self) -> Result<()> {
        self.conn.execute_batch(schema::SCHEMA)?;
        Ok(())
    }

    /// Close the connection so the file on disk is complete.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e.into())
    }
}

impl CollectionRepository for SqliteRepository {
    fn write_collection(&self, blobs: &CollectionBlobs, now: DateTime<Utc>) -> Result<()> {
        let millis = now.timestamp_millis();
        self.conn.execute(
            schema::INSERT_COLLECTION,
            params![
                now.timestamp(),
                millis,
                millis,
                schema::SCHEMA_VERSION,
                blobs.conf,
                blobs.models,
                blobs.decks,
                blobs.dconf,
            ],
        )?;
        Ok(())
    }
}

impl NoteRepository for SqliteRepository {
    fn insert_notes(&self, notes: &[EncodedNote]) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut insert_note = tx.prepare(schema::INSERT_NOTE)?;
            let mut insert_card = tx.prepare(schema::INSERT_CARD)?;

            for EncodedNote { note, cards } in notes {
                insert_note.execute(params![
                    note.id,
                    note.guid,
                    note.model_id,
                    note.modified,
                    note.usn,
                    note.tags,
                    note.fields,
                    note.sort_field,
                    note.checksum,
                ])?;

                for card in cards {
                    insert_card.execute(params![
                        card.id,
                        card.note_id,
                        card.deck_id,
                        card.ord,
                        card.modified,
                        card.usn,
                        card.card_type,
                        card.queue,
                        card.due,
                    ])?;
                }
            }
        }
        tx.commit()?;
        Ok(notes.len())
    }

    fn count_notes(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn count_cards(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM cards", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use vocadeck_core::{encode_items, vocabulary_note_type, CollectionConfig, IdSeed, VocabularyItem};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap()
    }

    fn repo() -> SqliteRepository {
        let repo = SqliteRepository::open_in_memory().unwrap();
        repo.create_schema().unwrap();
        repo
    }

    fn item(word: &str) -> VocabularyItem {
        VocabularyItem {
            word: word.into(),
            definition: "definition".into(),
            ipa: "ipa".into(),
            example_source: "source".into(),
            example_target: "target".into(),
        }
    }

    #[test]
    fn schema_creates_tables_and_indexes() {
        let repo = repo();
        let mut stmt = repo
            .conn
            .prepare("SELECT type, name FROM sqlite_master WHERE name NOT LIKE 'sqlite_%' ORDER BY type, name")
            .unwrap();
        let objects: Vec<(String, String)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap();

        let tables: Vec<_> = objects.iter().filter(|(t, _)| t == "table").map(|(_, n)| n.as_str()).collect();
        let indexes: Vec<_> = objects.iter().filter(|(t, _)| t == "index").map(|(_, n)| n.as_str()).collect();
        assert_eq!(tables, vec!["cards", "col", "graves", "notes", "revlog"]);
        assert_eq!(
            indexes,
            vec![
                "ix_cards_nid",
                "ix_cards_sched",
                "ix_cards_usn",
                "ix_notes_csum",
                "ix_notes_usn",
                "ix_revlog_cid",
                "ix_revlog_usn",
            ]
        );
    }

    #[test]
    fn schema_is_idempotent() {
        let repo = repo();
        repo.create_schema().unwrap();
    }

    #[test]
    fn write_collection_row() {
        let repo = repo();
        let model = vocabulary_note_type();
        let blobs = CollectionConfig::new("Deck", &model, now()).to_blobs().unwrap();
        repo.write_collection(&blobs, now()).unwrap();

        let (crt, modified, ver, usn, decks, tags): (i64, i64, i64, i64, String, String) = repo
            .conn
            .query_row("SELECT crt, mod, ver, usn, decks, tags FROM col", [], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?, row.get(5)?))
            })
            .unwrap();
        assert_eq!(crt, now().timestamp());
        assert_eq!(modified, now().timestamp_millis());
        assert_eq!(ver, schema::SCHEMA_VERSION);
        assert_eq!(usn, -1);
        assert_eq!(decks, blobs.decks);
        assert_eq!(tags, "{}");
    }

    #[test]
    fn second_collection_row_is_rejected() {
        let repo = repo();
        let model = vocabulary_note_type();
        let blobs = CollectionConfig::new("Deck", &model, now()).to_blobs().unwrap();
        repo.write_collection(&blobs, now()).unwrap();
        assert!(matches!(
            repo.write_collection(&blobs, now()),
            Err(DbError::Sqlite(_))
        ));
    }

    #[test]
    fn insert_notes_and_cards() {
        let repo = repo();
        let items = vec![item("one"), item("two"), item("three")];
        let encoded = encode_items(&items, &vocabulary_note_type(), IdSeed(10_000), now()).unwrap();

        assert_eq!(repo.insert_notes(&encoded).unwrap(), 3);
        assert_eq!(repo.count_notes().unwrap(), 3);
        assert_eq!(repo.count_cards().unwrap(), 6);

        let dues: Vec<(i64, i64)> = repo
            .conn
            .prepare("SELECT ord, due FROM cards ORDER BY id")
            .unwrap()
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        assert_eq!(dues, vec![(0, 1), (1, 1), (0, 2), (1, 2), (0, 3), (1, 3)]);
    }

    #[test]
    fn insert_empty_batch() {
        let repo = repo();
        assert_eq!(repo.insert_notes(&[]).unwrap(), 0);
        assert_eq!(repo.count_cards().unwrap(), 0);
    }

    #[test]
    fn failed_insert_rolls_back_batch() {
        let repo = repo();
        let items = vec![item("one"), item("two")];
        let mut encoded = encode_items(&items, &vocabulary_note_type(), IdSeed(10_000), now()).unwrap();
        encoded[1].note.id = encoded[0].note.id;

        assert!(repo.insert_notes(&encoded).is_err());
        assert_eq!(repo.count_notes().unwrap(), 0);
        assert_eq!(repo.count_cards().unwrap(), 0);
    }
}
