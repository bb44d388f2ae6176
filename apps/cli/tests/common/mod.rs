//! Shared helpers for package integration tests.

#![allow(dead_code)]

use rusqlite::Connection;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use vocadeck::{generate_apkg, ExportOptions, ExportSummary};
use vocadeck_core::VocabularyItem;
use zip::ZipArchive;

/// Output directory plus the package path inside it.
pub struct TestOutput {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl TestOutput {
    pub fn new(file_name: &str) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join(file_name);
        Self { dir, path }
    }
}

/// A vocabulary item with derived placeholder content.
pub fn item(word: &str) -> VocabularyItem {
    VocabularyItem {
        word: word.to_string(),
        definition: format!("definition of {}", word),
        ipa: format!("ˈ{}", word),
        example_source: format!("I use {} every day.", word),
        example_target: format!("Пример для {}.", word),
    }
}

/// `count` distinct items.
pub fn sample_items(count: usize) -> Vec<VocabularyItem> {
    (0..count).map(|i| item(&format!("word{}", i + 1))).collect()
}

/// Export `items` into a fresh directory.
pub fn export(items: &[VocabularyItem], deck_name: &str) -> (TestOutput, ExportSummary) {
    let output = TestOutput::new("deck.apkg");
    let summary = generate_apkg(items, &output.path, &ExportOptions::new(deck_name)).expect("export");
    (output, summary)
}

/// Names and contents of every archive entry.
pub fn read_entries(path: &Path) -> Vec<(String, Vec<u8>)> {
    let mut archive = ZipArchive::new(File::open(path).expect("open package")).expect("zip archive");
    (0..archive.len())
        .map(|i| {
            let mut entry = archive.by_index(i).expect("entry");
            assert!(!entry.encrypted(), "entries must not be encrypted");
            let mut data = Vec::new();
            entry.read_to_end(&mut data).expect("read entry");
            (entry.name().to_string(), data)
        })
        .collect()
}

/// Opened collection database extracted from a package.
pub struct Collection {
    _dir: TempDir,
    pub conn: Connection,
}

/// Extract `collection.anki2` from a package and open it.
pub fn open_collection(package: &Path) -> Collection {
    let (_, bytes) = read_entries(package)
        .into_iter()
        .find(|(name, _)| name == "collection.anki2")
        .expect("collection entry");

    let dir = TempDir::new().expect("temp dir");
    let db_path = dir.path().join("collection.anki2");
    std::fs::write(&db_path, bytes).expect("write collection");
    let conn = Connection::open(&db_path).expect("open collection");
    Collection { _dir: dir, conn }
}

impl Collection {
    pub fn count(&self, table: &str) -> i64 {
        self.conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
            .expect("count")
    }

    pub fn col_text(&self, column: &str) -> String {
        self.conn
            .query_row(&format!("SELECT {} FROM col", column), [], |row| row.get(0))
            .expect("col column")
    }

    pub fn col_json(&self, column: &str) -> serde_json::Value {
        serde_json::from_str(&self.col_text(column)).expect("valid json")
    }

    /// `(id, flds, sfld, csum)` of every note, by id.
    pub fn notes(&self) -> Vec<(i64, String, String, i64)> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, flds, sfld, csum FROM notes ORDER BY id")
            .expect("prepare");
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)))
            .expect("query")
            .collect::<Result<_, _>>()
            .expect("rows");
        rows
    }

    /// `(nid, ord, did, due)` of every card, by id.
    pub fn cards(&self) -> Vec<(i64, i64, i64, i64)> {
        let mut stmt = self
            .conn
            .prepare("SELECT nid, ord, did, due FROM cards ORDER BY id")
            .expect("prepare");
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)))
            .expect("query")
            .collect::<Result<_, _>>()
            .expect("rows");
        rows
    }
}
