//! Error types for vocadeck-core.

use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while reading a vocabulary file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid JSON at line {line}, column {column}: {message}")]
    InvalidJson {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("expected a JSON array of vocabulary items")]
    NotAnArray,

    #[error("item {index} is not an object")]
    NotAnObject { index: usize },

    #[error("item {index} is missing field `{field}`")]
    MissingField { index: usize, field: String },

    #[error("item {index} has an invalid field: {message}")]
    InvalidField { index: usize, message: String },
}

/// Errors raised while deriving note and card rows.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("id seed {seed} leaves no room for the ids of {items} items")]
    IdOverflow { seed: i64, items: usize },
}

/// Errors found when checking a note type definition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NoteTypeError {
    #[error("template `{template}` references undeclared field `{field}`")]
    UnknownField { template: String, field: String },

    #[error("field `{field}` has ordinal {ord}, expected {expected}")]
    FieldOrder { field: String, ord: u32, expected: u32 },

    #[error("template `{template}` has ordinal {ord}, expected {expected}")]
    TemplateOrder { template: String, ord: u32, expected: u32 },
}
