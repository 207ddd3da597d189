// src/engine/document.rs
//
// RawDocument → DocumentRecord: normalize, resolve speaker, segment, and
// attach title metadata. Pure; safe to run on any thread.

use crate::core::{normalize_line, NormalizedLine};
use crate::data::RawDocument;
use crate::specs::{speakers, title};

use super::classify::TurnClassifier;
use super::segment::segment;
use super::types::DocumentRecord;

pub fn build_record(doc: &RawDocument) -> DocumentRecord {
    let lines: Vec<NormalizedLine> = doc.lines.iter().map(|l| normalize_line(l)).collect();

    let speaker = speakers::resolve(&doc.title, &lines, doc.language);
    let classifier = TurnClassifier::new(doc.language, &speaker.original_name);
    let turns = segment(&lines, &classifier);

    let facts = title::facts(&doc.title, doc.raw_date.as_deref(), doc.language);
    let press_event_type = title::event_type(&doc.title, doc.language);

    DocumentRecord {
        title: doc.title.clone(),
        speaker,
        date: facts.date,
        topic: facts.topic,
        press_event_type,
        turns,
        url: doc.url.clone(),
        language: doc.language,
        scrape_date: doc.scrape_timestamp,
    }
}
