//! Database error types.

use thiserror::Error;
use vocadeck_core::NoteTypeError;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid note type: {0}")]
    InvalidNoteType(#[from] NoteTypeError),
}
