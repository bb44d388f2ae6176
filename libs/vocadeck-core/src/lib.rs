//! Core vocabulary deck library.
//!
//! Provides:
//! - Vocabulary file parser
//! - The vocabulary note type and its card templates
//! - Collection configuration blobs (global config, note types, decks, options)
//! - Field escaping, joining and the sort-field checksum
//! - Note and card row derivation

pub mod config;
pub mod encoder;
pub mod error;
pub mod fields;
pub mod model;
pub mod parser;
pub mod types;

pub use config::{CollectionBlobs, CollectionConfig, DECK_CONFIG_ID, DEFAULT_DECK_ID, WORKING_DECK_ID};
pub use encoder::{encode_items, IdSeed, GUID_PREFIX};
pub use error::{EncodeError, NoteTypeError, ParseError, Result};
pub use fields::{escape_field, field_checksum, join_fields, FIELD_SEPARATOR};
pub use model::{vocabulary_note_type, MODEL_ID};
pub use parser::parse;
pub use types::{
    CardRow, EncodedNote, NoteRow, NoteType, VocabularyItem, CARD_TYPE_NEW, QUEUE_NEW, USN_LOCAL,
};
