//! Maps vocabulary items to note and card rows.

use crate::config::WORKING_DECK_ID;
use crate::error::EncodeError;
use crate::fields::{field_checksum, join_fields};
use crate::types::{
    CardRow, EncodedNote, NoteRow, NoteType, VocabularyItem, CARD_TYPE_NEW, QUEUE_NEW, USN_LOCAL,
};
use chrono::{DateTime, Utc};

/// Prefix of every note GUID.
pub const GUID_PREFIX: &str = "vocadeck";

/// Base for note and card identifiers, in milliseconds.
///
/// Notes take `seed..seed + n`; cards continue from `seed + n`. Every id
/// handed out must fit in an `i64`, which [`encode_items`] checks up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdSeed(pub i64);

impl IdSeed {
    /// Seed from a wall-clock reading.
    pub fn from_time(time: DateTime<Utc>) -> Self {
        Self(time.timestamp_millis())
    }
}

/// Hands out consecutive identifiers.
#[derive(Debug)]
struct IdCounter(i64);

impl IdCounter {
    fn next(&mut self) -> i64 {
        let id = self.0;
        self.0 += 1;
        id
    }
}

/// Encode items in order. Produces one note per item and one card per
/// template of `note_type`.
///
/// Fails when the ids for all notes and cards would run past `i64::MAX`.
pub fn encode_items(
    items: &[VocabularyItem],
    note_type: &NoteType,
    seed: IdSeed,
    now: DateTime<Utc>,
) -> Result<Vec<EncodedNote>, EncodeError> {
    let overflow = || EncodeError::IdOverflow {
        seed: seed.0,
        items: items.len(),
    };
    let notes = i64::try_from(items.len()).map_err(|_| overflow())?;
    let ids_needed = i64::try_from(note_type.templates.len())
        .ok()
        .and_then(|templates| templates.checked_add(1))
        .and_then(|per_note| per_note.checked_mul(notes))
        .ok_or_else(overflow)?;
    seed.0.checked_add(ids_needed).ok_or_else(overflow)?;

    let modified = now.timestamp();
    let mut note_ids = IdCounter(seed.0);
    let mut card_ids = IdCounter(seed.0 + notes);

    let encoded = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let note = encode_note(item, note_type.id, note_ids.next(), modified);
            let cards = note_type
                .templates
                .iter()
                .map(|template| CardRow {
                    id: card_ids.next(),
                    note_id: note.id,
                    deck_id: WORKING_DECK_ID,
                    ord: template.ord,
                    modified,
                    usn: USN_LOCAL,
                    card_type: CARD_TYPE_NEW,
                    queue: QUEUE_NEW,
                    due: index as i64 + 1,
                })
                .collect();
            EncodedNote { note, cards }
        })
        .collect();
    Ok(encoded)
}

fn encode_note(item: &VocabularyItem, model_id: i64, id: i64, modified: i64) -> NoteRow {
    NoteRow {
        id,
        guid: format!("{}{}", GUID_PREFIX, id),
        model_id,
        modified,
        usn: USN_LOCAL,
        tags: String::new(),
        fields: join_fields(item.field_values()),
        sort_field: item.word.clone(),
        checksum: field_checksum(&item.word),
    }
}
