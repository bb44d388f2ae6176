//! Core types for vocabulary decks.

use serde::{Deserialize, Serialize};

/// Update sequence number marking a row as created locally and never synced.
pub const USN_LOCAL: i64 = -1;

/// `cards.type` of a card that has never been studied.
pub const CARD_TYPE_NEW: i64 = 0;

/// `cards.queue` of a card waiting in the new queue.
pub const QUEUE_NEW: i64 = 0;

/// One vocabulary record supplied by the upstream extraction step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyItem {
    pub word: String,
    pub definition: String,
    /// Phonetic transcription.
    pub ipa: String,
    /// Example sentence in the source language.
    #[serde(alias = "example_en")]
    pub example_source: String,
    /// The same example translated into the learner's language.
    #[serde(alias = "example_ru")]
    pub example_target: String,
}

impl VocabularyItem {
    /// Field values in note-type declaration order.
    pub fn field_values(&self) -> [&str; 5] {
        [
            &self.word,
            &self.definition,
            &self.ipa,
            &self.example_source,
            &self.example_target,
        ]
    }
}

/// A field declared by a note type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub ord: u32,
}

/// A question/answer render rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub ord: u32,
    pub question: &'static str,
    pub answer: &'static str,
}

/// Note type (model): ordered fields plus the templates that render them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteType {
    pub id: i64,
    pub name: &'static str,
    pub fields: Vec<FieldDef>,
    pub templates: Vec<Template>,
    pub css: &'static str,
}

/// A note row ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRow {
    pub id: i64,
    pub guid: String,
    pub model_id: i64,
    /// Modification time in seconds.
    pub modified: i64,
    pub usn: i64,
    pub tags: String,
    /// Escaped field values joined by the field separator.
    pub fields: String,
    /// Raw (unescaped) first field.
    pub sort_field: String,
    pub checksum: i64,
}

/// A card row ready for insertion. Scheduling columns not listed here are
/// written as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRow {
    pub id: i64,
    pub note_id: i64,
    pub deck_id: i64,
    pub ord: u32,
    /// Modification time in seconds.
    pub modified: i64,
    pub usn: i64,
    pub card_type: i64,
    pub queue: i64,
    /// New-card position; cards surface in input order.
    pub due: i64,
}

/// A note together with one card per template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedNote {
    pub note: NoteRow,
    pub cards: Vec<CardRow>,
}
