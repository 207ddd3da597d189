// src/engine/types.rs
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use super::language::Language;

/// Joins the paragraphs of one utterance inside [`Turn::text`].
pub const PARAGRAPH_BREAK: &str = "<br><br>";

/// Original name carried by a speaker that is not in the lookup table.
pub const UNRESOLVED_SPEAKER: &str = "Unknown";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TurnKind { Question, Answer, Unclassified }

impl TurnKind {
    /// Short label used in the corpus files.
    pub fn label(self) -> &'static str {
        match self {
            TurnKind::Question => "Q",
            TurnKind::Answer => "A",
            TurnKind::Unclassified => "None",
        }
    }
}

impl fmt::Display for TurnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// One continuous utterance, merged from one or more lines.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub text: String,
    /// 1-based, gapless within a document.
    pub order: u32,
    pub kind: TurnKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum PressEventType { RegularPressConference, Remarks, Unknown }

impl PressEventType {
    pub fn label(self) -> &'static str {
        match self {
            PressEventType::RegularPressConference => "Regular Press Conference",
            PressEventType::Remarks => "Remarks",
            PressEventType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for PressEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SpeakerIdentity {
    /// Name as it appears in the source, in the document's script.
    pub original_name: String,
    /// `"English|中文"` when the name is in the lookup table.
    pub canonical_name: Option<String>,
}

impl SpeakerIdentity {
    pub fn unresolved() -> Self {
        Self { original_name: s!(UNRESOLVED_SPEAKER), canonical_name: None }
    }

    pub fn is_resolved(&self) -> bool {
        self.canonical_name.is_some()
    }
}

/// Everything extracted from one crawled page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DocumentRecord {
    pub title: String,
    pub speaker: SpeakerIdentity,
    pub date: Option<NaiveDate>,
    pub topic: Option<String>,
    pub press_event_type: PressEventType,
    pub turns: Vec<Turn>,
    pub url: String,
    pub language: Language,
    /// Run-specific; never part of a [`TurnRow`].
    pub scrape_date: NaiveDate,
}

impl DocumentRecord {
    /// Explode into one row per turn, sharing the document-level fields.
    pub fn rows(&self) -> Vec<TurnRow> {
        self.turns
            .iter()
            .map(|turn| TurnRow {
                title: self.title.clone(),
                speaker_canonical: self.speaker.canonical_name.clone(),
                speaker_original: self.speaker.original_name.clone(),
                date: self.date,
                topic: self.topic.clone(),
                press_event_type: self.press_event_type,
                turn_text: turn.text.clone(),
                turn_order: turn.order,
                turn_kind: turn.kind,
                url: self.url.clone(),
                language: self.language,
            })
            .collect()
    }
}

/// Flattened corpus row. Deduplication compares all fields.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TurnRow {
    pub title: String,
    pub speaker_canonical: Option<String>,
    pub speaker_original: String,
    pub date: Option<NaiveDate>,
    pub topic: Option<String>,
    pub press_event_type: PressEventType,
    pub turn_text: String,
    pub turn_order: u32,
    pub turn_kind: TurnKind,
    pub url: String,
    pub language: Language,
}

impl TurnRow {
    pub const HEADERS: [&'static str; 11] = [
        "title",
        "speaker_canonical",
        "speaker_original",
        "date",
        "topic",
        "press_event_type",
        "turn_text",
        "turn_order",
        "turn_kind",
        "url",
        "language",
    ];

    pub fn headers() -> Vec<String> {
        Self::HEADERS.iter().map(|h| s!(*h)).collect()
    }

    /// Cells in [`TurnRow::HEADERS`] order; absent values are empty cells.
    pub fn to_fields(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.speaker_canonical.clone().unwrap_or_default(),
            self.speaker_original.clone(),
            self.date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            self.topic.clone().unwrap_or_default(),
            s!(self.press_event_type.label()),
            self.turn_text.clone(),
            self.turn_order.to_string(),
            s!(self.turn_kind.label()),
            self.url.clone(),
            s!(self.language.label()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> DocumentRecord {
        DocumentRecord {
            title: s!("Foreign Ministry Spokesperson Geng Shuang's Regular Press Conference on July 3, 2020"),
            speaker: SpeakerIdentity {
                original_name: s!("Geng Shuang"),
                canonical_name: Some(s!("Geng Shuang|耿爽")),
            },
            date: NaiveDate::from_ymd_opt(2020, 7, 3),
            topic: None,
            press_event_type: PressEventType::RegularPressConference,
            turns: vec![
                Turn { text: s!("Q: One?"), order: 1, kind: TurnKind::Question },
                Turn { text: s!("A: Two."), order: 2, kind: TurnKind::Answer },
            ],
            url: s!("https://example.org/t.shtml"),
            language: Language::English,
            scrape_date: NaiveDate::from_ymd_opt(2020, 7, 4).unwrap(),
        }
    }

    #[test]
    fn rows_share_document_fields() {
        let rows = record().rows();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.speaker_original == "Geng Shuang"));
        assert_eq!(rows[1].turn_order, 2);
        assert_eq!(rows[1].turn_kind, TurnKind::Answer);
    }

    #[test]
    fn fields_follow_header_order() {
        let fields = record().rows()[0].to_fields();
        assert_eq!(fields.len(), TurnRow::HEADERS.len());
        assert_eq!(fields[3], "2020-07-03");
        assert_eq!(fields[4], "");
        assert_eq!(fields[5], "Regular Press Conference");
        assert_eq!(fields[7], "1");
        assert_eq!(fields[8], "Q");
        assert_eq!(fields[10], "English");
    }
}
