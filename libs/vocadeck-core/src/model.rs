//! The vocabulary note type: fields, card templates and stylesheet.

use crate::error::NoteTypeError;
use crate::types::{FieldDef, NoteType, Template};

/// Note type identifier. Fixed so that re-importing a package updates the
/// existing note type in the consuming application instead of duplicating it.
pub const MODEL_ID: i64 = 1_704_067_200_000;

pub const MODEL_NAME: &str = "vocadeck Vocabulary";

const FORWARD_QUESTION: &str = r#"<div class="word">{{Word}}</div>"#;

const FORWARD_ANSWER: &str = r#"<div class="word">{{Word}}</div>
<hr id="answer">
<div class="definition">{{Definition}}</div>
<div class="ipa">/{{IPA}}/</div>
<div class="example">
  <div class="source">{{Example}}</div>
  <div class="target">{{Translation}}</div>
</div>"#;

const REVERSE_QUESTION: &str = r#"<div class="definition">{{Definition}}</div>"#;

const REVERSE_ANSWER: &str = r#"<div class="definition">{{Definition}}</div>
<hr id="answer">
<div class="word">{{Word}}</div>
<div class="ipa">/{{IPA}}/</div>
<div class="example">
  <div class="source">{{Example}}</div>
  <div class="target">{{Translation}}</div>
</div>"#;

const CSS: &str = ".card {
  font-family: arial;
  font-size: 20px;
  text-align: center;
  color: black;
  background-color: white;
}
.word {
  font-size: 28px;
  font-weight: bold;
  color: #2196F3;
}
.definition {
  font-size: 22px;
  margin: 10px 0;
}
.ipa {
  font-size: 18px;
  color: #666;
  font-style: italic;
}
.example {
  margin-top: 15px;
  text-align: left;
  padding: 10px;
  background: #f5f5f5;
  border-radius: 5px;
}
.example .source {
  font-weight: bold;
}
.example .target {
  color: #666;
  margin-top: 5px;
}";

/// The note type every vocabulary note uses. Field order matches
/// [`VocabularyItem::field_values`](crate::types::VocabularyItem::field_values).
pub fn vocabulary_note_type() -> NoteType {
    let fields = ["Word", "Definition", "IPA", "Example", "Translation"]
        .into_iter()
        .zip(0..)
        .map(|(name, ord)| FieldDef { name, ord })
        .collect();

    NoteType {
        id: MODEL_ID,
        name: MODEL_NAME,
        fields,
        templates: vec![
            Template {
                name: "Forward",
                ord: 0,
                question: FORWARD_QUESTION,
                answer: FORWARD_ANSWER,
            },
            Template {
                name: "Reverse",
                ord: 1,
                question: REVERSE_QUESTION,
                answer: REVERSE_ANSWER,
            },
        ],
        css: CSS,
    }
}

impl NoteType {
    /// Check that ordinals run 0..n and every template placeholder names a
    /// declared field.
    pub fn validate(&self) -> Result<(), NoteTypeError> {
        for (expected, field) in (0..).zip(&self.fields) {
            if field.ord != expected {
                return Err(NoteTypeError::FieldOrder {
                    field: field.name.to_string(),
                    ord: field.ord,
                    expected,
                });
            }
        }

        for (expected, template) in (0..).zip(&self.templates) {
            if template.ord != expected {
                return Err(NoteTypeError::TemplateOrder {
                    template: template.name.to_string(),
                    ord: template.ord,
                    expected,
                });
            }
            for placeholder in placeholders(template.question).chain(placeholders(template.answer)) {
                if self.field_index(placeholder).is_none() {
                    return Err(NoteTypeError::UnknownField {
                        template: template.name.to_string(),
                        field: placeholder.to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Position of the named field.
    pub fn field_index(&self, name: &str) -> Option<u32> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.ord)
    }

    /// For each template, the fields its question needs before a card is
    /// generated.
    pub fn requirements(&self) -> Vec<(u32, &'static str, Vec<u32>)> {
        self.templates
            .iter()
            .map(|t| {
                let mut required: Vec<u32> = placeholders(t.question)
                    .filter_map(|p| self.field_index(p))
                    .collect();
                required.sort_unstable();
                required.dedup();
                (t.ord, "any", required)
            })
            .collect()
    }
}

/// Field names referenced as `{{Name}}` in a template. Section markers
/// (`#`, `/`, `^`) and filter prefixes (`text:Name`) are stripped.
pub fn placeholders<'a>(template: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    template
        .split("{{")
        .skip(1)
        .filter_map(|part| part.split_once("}}").map(|(inner, _)| inner))
        .map(|inner| {
            let name = inner.trim().trim_start_matches(['#', '/', '^']);
            name.rsplit(':').next().unwrap_or(name).trim()
        })
}
