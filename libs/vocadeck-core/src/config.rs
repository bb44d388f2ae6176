//! JSON configuration stored in the collection row: global preferences,
//! note types, decks and deck option groups.

use crate::model::MODEL_ID;
use crate::types::{NoteType, USN_LOCAL};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// The consuming application's always-present deck.
pub const DEFAULT_DECK_ID: i64 = 1;

/// Deck that receives every generated card. Fixed for the same reason as
/// [`MODEL_ID`].
pub const WORKING_DECK_ID: i64 = 1_704_067_200_001;

/// Option group shared by both decks.
pub const DECK_CONFIG_ID: i64 = 1;

const DEFAULT_DECK_NAME: &str = "Default";
const WORKING_DECK_DESCRIPTION: &str = "Vocabulary deck created by vocadeck";

const LATEX_PRE: &str = r"\documentclass[12pt]{article}
\special{papersize=3in,5in}
\usepackage[utf8]{inputenc}
\usepackage{amssymb,amsmath}
\pagestyle{empty}
\setlength{\parindent}{0in}
\begin{document}";

const LATEX_POST: &str = r"\end{document}";

/// The four encoded blobs of the collection row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionBlobs {
    pub conf: String,
    pub models: String,
    pub decks: String,
    pub dconf: String,
}

/// Everything needed to synthesize the collection configuration.
#[derive(Debug, Clone)]
pub struct CollectionConfig<'a> {
    pub deck_name: &'a str,
    pub note_type: &'a NoteType,
    pub now: DateTime<Utc>,
}

impl<'a> CollectionConfig<'a> {
    pub fn new(deck_name: &'a str, note_type: &'a NoteType, now: DateTime<Utc>) -> Self {
        Self {
            deck_name,
            note_type,
            now,
        }
    }

    /// Encode all four blobs.
    pub fn to_blobs(&self) -> serde_json::Result<CollectionBlobs> {
        Ok(CollectionBlobs {
            conf: serde_json::to_string(&self.global_config())?,
            models: serde_json::to_string(&self.models())?,
            decks: serde_json::to_string(&self.decks())?,
            dconf: serde_json::to_string(&self.deck_configs())?,
        })
    }

    fn global_config(&self) -> GlobalConfig {
        GlobalConfig {
            active_decks: vec![WORKING_DECK_ID],
            cur_deck: WORKING_DECK_ID,
            new_spread: 0,
            collapse_time: 1200,
            time_lim: 0,
            est_times: true,
            due_counts: true,
            cur_model: self.note_type.id.to_string(),
            next_pos: 1,
            sort_type: "noteFld",
            sort_backwards: false,
            add_to_cur: true,
        }
    }

    fn models(&self) -> BTreeMap<String, ModelJson> {
        let model = self.note_type;
        let json = ModelJson {
            id: model.id,
            name: model.name,
            kind: 0,
            modified: self.now.timestamp(),
            usn: USN_LOCAL,
            sortf: 0,
            did: WORKING_DECK_ID,
            tmpls: model
                .templates
                .iter()
                .map(|t| TemplateJson {
                    name: t.name,
                    ord: t.ord,
                    qfmt: t.question,
                    afmt: t.answer,
                    bqfmt: "",
                    bafmt: "",
                    did: None,
                })
                .collect(),
            flds: model
                .fields
                .iter()
                .map(|f| FieldJson {
                    name: f.name,
                    ord: f.ord,
                    sticky: false,
                    rtl: false,
                    font: "Arial",
                    size: 20,
                    media: Vec::new(),
                })
                .collect(),
            css: model.css,
            latex_pre: LATEX_PRE,
            latex_post: LATEX_POST,
            latexsvg: false,
            req: model.requirements(),
            tags: Vec::new(),
        };
        BTreeMap::from([(model.id.to_string(), json)])
    }

    fn decks(&self) -> BTreeMap<String, DeckJson<'a>> {
        let modified = self.now.timestamp();
        BTreeMap::from([
            (
                DEFAULT_DECK_ID.to_string(),
                DeckJson::new(DEFAULT_DECK_ID, DEFAULT_DECK_NAME, "", modified),
            ),
            (
                WORKING_DECK_ID.to_string(),
                DeckJson::new(
                    WORKING_DECK_ID,
                    self.deck_name,
                    WORKING_DECK_DESCRIPTION,
                    modified,
                ),
            ),
        ])
    }

    fn deck_configs(&self) -> BTreeMap<String, DeckConfigJson> {
        BTreeMap::from([(DECK_CONFIG_ID.to_string(), DeckConfigJson::default())])
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GlobalConfig {
    active_decks: Vec<i64>,
    cur_deck: i64,
    new_spread: u32,
    collapse_time: u32,
    time_lim: u32,
    est_times: bool,
    due_counts: bool,
    cur_model: String,
    next_pos: i64,
    sort_type: &'static str,
    sort_backwards: bool,
    add_to_cur: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ModelJson {
    id: i64,
    name: &'static str,
    #[serde(rename = "type")]
    kind: u8,
    #[serde(rename = "mod")]
    modified: i64,
    usn: i64,
    sortf: u32,
    did: i64,
    tmpls: Vec<TemplateJson>,
    flds: Vec<FieldJson>,
    css: &'static str,
    latex_pre: &'static str,
    latex_post: &'static str,
    latexsvg: bool,
    req: Vec<(u32, &'static str, Vec<u32>)>,
    tags: Vec<String>,
}

#[derive(Debug, Serialize)]
struct TemplateJson {
    name: &'static str,
    ord: u32,
    qfmt: &'static str,
    afmt: &'static str,
    bqfmt: &'static str,
    bafmt: &'static str,
    did: Option<i64>,
}

#[derive(Debug, Serialize)]
struct FieldJson {
    name: &'static str,
    ord: u32,
    sticky: bool,
    rtl: bool,
    font: &'static str,
    size: u32,
    media: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeckJson<'a> {
    id: i64,
    name: &'a str,
    #[serde(rename = "mod")]
    modified: i64,
    usn: i64,
    lrn_today: [i64; 2],
    rev_today: [i64; 2],
    new_today: [i64; 2],
    time_today: [i64; 2],
    collapsed: bool,
    browser_collapsed: bool,
    desc: &'static str,
    #[serde(rename = "dyn")]
    dynamic: u8,
    conf: i64,
}

impl<'a> DeckJson<'a> {
    fn new(id: i64, name: &'a str, desc: &'static str, modified: i64) -> Self {
        Self {
            id,
            name,
            modified,
            usn: USN_LOCAL,
            lrn_today: [0, 0],
            rev_today: [0, 0],
            new_today: [0, 0],
            time_today: [0, 0],
            collapsed: false,
            browser_collapsed: false,
            desc,
            dynamic: 0,
            conf: DECK_CONFIG_ID,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeckConfigJson {
    id: i64,
    name: &'static str,
    #[serde(rename = "mod")]
    modified: i64,
    usn: i64,
    max_taken: u32,
    autoplay: bool,
    timer: u8,
    replayq: bool,
    new: NewCardConfig,
    rev: ReviewConfig,
    lapse: LapseConfig,
    #[serde(rename = "dyn")]
    dynamic: bool,
}

impl Default for DeckConfigJson {
    fn default() -> Self {
        Self {
            id: DECK_CONFIG_ID,
            name: DEFAULT_DECK_NAME,
            modified: 0,
            usn: 0,
            max_taken: 60,
            autoplay: true,
            timer: 0,
            replayq: true,
            new: NewCardConfig {
                bury: true,
                delays: vec![1.0, 10.0],
                initial_factor: 2500,
                ints: [1, 4, 7],
                order: 1,
                per_day: 20,
            },
            rev: ReviewConfig {
                bury: true,
                ease4: 1.3,
                fuzz: 0.05,
                ivl_fct: 1.0,
                max_ivl: 36500,
                per_day: 200,
                hard_factor: 1.2,
            },
            lapse: LapseConfig {
                delays: vec![10.0],
                leech_action: 0,
                leech_fails: 8,
                min_int: 1,
                mult: 0.0,
            },
            dynamic: false,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewCardConfig {
    bury: bool,
    /// Learning steps in minutes.
    delays: Vec<f64>,
    initial_factor: u32,
    /// Graduating, easy and unused intervals in days.
    ints: [u32; 3],
    order: u8,
    per_day: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewConfig {
    bury: bool,
    ease4: f64,
    fuzz: f64,
    ivl_fct: f64,
    max_ivl: u32,
    per_day: u32,
    hard_factor: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LapseConfig {
    delays: Vec<f64>,
    leech_action: u8,
    leech_fails: u32,
    min_int: u32,
    mult: f64,
}
