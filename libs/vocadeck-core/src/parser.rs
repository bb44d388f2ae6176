//! Parser for vocabulary files produced by the extraction step.
//!
//! # Format
//! ````text
//! ```json
//! [
//!   {
//!     "word": "ubiquitous",
//!     "definition": "вездесущий",
//!     "ipa": "juːˈbɪkwɪtəs",
//!     "example_source": "Phones are ubiquitous.",
//!     "example_target": "Телефоны повсюду."
//!   }
//! ]
//! ```
//! ````
//!
//! The surrounding code fence is optional. `example_en` and `example_ru`
//! are accepted in place of `example_source` and `example_target`.

use crate::error::{ParseError, Result};
use crate::types::VocabularyItem;
use serde_json::Value;

/// Parse vocabulary file content into items, preserving order.
pub fn parse(content: &str) -> Result<Vec<VocabularyItem>> {
    let body = strip_code_fence(content);
    if body.is_empty() {
        return Ok(vec![]);
    }

    let value: Value = serde_json::from_str(body).map_err(|e| ParseError::InvalidJson {
        line: e.line(),
        column: e.column(),
        message: e.to_string(),
    })?;

    let Value::Array(elements) = value else {
        return Err(ParseError::NotAnArray);
    };

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            if !element.is_object() {
                return Err(ParseError::NotAnObject { index });
            }
            serde_json::from_value::<VocabularyItem>(element).map_err(|e| item_error(index, e))
        })
        .collect()
}

/// Classify a per-item deserialization failure.
fn item_error(index: usize, error: serde_json::Error) -> ParseError {
    let message = error.to_string();
    match message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.strip_suffix('`'))
    {
        Some(field) => ParseError::MissingField {
            index,
            field: field.to_string(),
        },
        None => ParseError::InvalidField { index, message },
    }
}

/// Strip a Markdown code fence (```` ```json ```` or bare ```` ``` ````)
/// and surrounding whitespace.
fn strip_code_fence(content: &str) -> &str {
    let mut s = content.trim();
    if let Some(rest) = s.strip_prefix("```json") {
        s = rest;
    } else if let Some(rest) = s.strip_prefix("```") {
        s = rest;
    }
    if let Some(rest) = s.strip_suffix("```") {
        s = rest;
    }
    s.trim()
}
