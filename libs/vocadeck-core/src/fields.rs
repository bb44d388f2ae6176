//! Note field encoding and the sort-field checksum.

use std::borrow::Cow;

/// Separator between field values inside a note's `flds` column (ASCII unit separator).
pub const FIELD_SEPARATOR: char = '\x1f';

/// Replacement written when a value contains the separator itself.
const SEPARATOR_ENTITY: &str = "&#31;";

/// Largest prime below 2^31.
const CHECKSUM_MODULUS: i64 = 2_147_483_647;

/// HTML-escape a field value so templates render it as text.
///
/// `&`, `<`, `>`, `"` and `'` become character references. A separator byte
/// inside the value is written as `&#31;` so the joined field count never
/// changes.
pub fn escape_field(value: &str) -> Cow<'_, str> {
    let escaped = html_escape::encode_quoted_attribute(value);
    if escaped.contains(FIELD_SEPARATOR) {
        Cow::Owned(escaped.replace(FIELD_SEPARATOR, SEPARATOR_ENTITY))
    } else {
        escaped
    }
}

/// Escape each value and join them with [`FIELD_SEPARATOR`].
pub fn join_fields<'a, I>(values: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut joined = String::new();
    for (i, value) in values.into_iter().enumerate() {
        if i > 0 {
            joined.push(FIELD_SEPARATOR);
        }
        joined.push_str(&escape_field(value));
    }
    joined
}

/// Base-31 rolling hash of the code points of `value`, reduced modulo
/// 2^31 - 1. Used to index notes for duplicate lookup, not for integrity.
pub fn field_checksum(value: &str) -> i64 {
    value
        .chars()
        .fold(0i64, |sum, c| (sum * 31 + c as i64) % CHECKSUM_MODULUS)
}
