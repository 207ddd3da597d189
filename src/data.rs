// src/data.rs
//
// Crawler dump → RawDocument.
//
// The crawler writes one JSON object per press page:
//   { "title": ["..."], "text": ["<p>..</p>", ...], "date": ["..."] | "None",
//     "url": "...", "lang": "English" | "Chinese", "scrape_date": "YYYYMMDD" }
// either as one JSON array or as JSON Lines.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::engine::language::Language;
use crate::error::{Error, RecordError, Result};

/// Crawler placeholder for "no date scraped".
const NO_DATE: &str = "None";
const SCRAPE_DATE_FMT: &str = "%Y%m%d";

/// One crawled page, as handed to the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawDocument {
    pub title: String,
    pub raw_date: Option<String>,
    pub lines: Vec<String>,
    pub url: String,
    pub language: Language,
    pub scrape_timestamp: NaiveDate,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_first(self) -> Option<String> {
        match self {
            OneOrMany::One(s) => Some(s),
            OneOrMany::Many(v) => v.into_iter().next(),
        }
    }
}

#[derive(Deserialize)]
struct CrawlerItem {
    #[serde(default)]
    title: Option<OneOrMany>,
    #[serde(default)]
    text: Vec<String>,
    #[serde(default)]
    date: Option<OneOrMany>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    lang: Option<String>,
    #[serde(default)]
    scrape_date: Option<String>,
}

impl RawDocument {
    pub fn from_value(value: Value) -> Result<Self, RecordError> {
        let item: CrawlerItem = serde_json::from_value(value)?;

        let title = item
            .title
            .and_then(OneOrMany::into_first)
            .filter(|t| !t.trim().is_empty())
            .ok_or(RecordError::MissingTitle)?;

        let url = item
            .url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or(RecordError::MissingUrl)?;

        let language = match item.lang {
            Some(l) => Language::from_label(&l).ok_or(RecordError::UnknownLanguage(l))?,
            None => Language::from_url(&url),
        };

        let raw_date = item
            .date
            .and_then(OneOrMany::into_first)
            .filter(|d| !d.trim().is_empty() && d.trim() != NO_DATE);

        let scrape_timestamp = match item.scrape_date {
            Some(s) => NaiveDate::parse_from_str(s.trim(), SCRAPE_DATE_FMT)
                .map_err(|_| RecordError::BadScrapeDate(s))?,
            None => chrono::Local::now().date_naive(),
        };

        Ok(Self { title, raw_date, lines: item.text, url, language, scrape_timestamp })
    }
}

/// Parse a dump already in memory. `json_lines` selects JSON Lines.
///
/// A top-level shape error (not an array, unreadable) is fatal; a bad record
/// only fails its own slot.
pub fn parse_dump(text: &str, json_lines: bool) -> Result<Vec<Result<RawDocument, RecordError>>> {
    if json_lines {
        let out = text
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                serde_json::from_str::<Value>(l)
                    .map_err(RecordError::from)
                    .and_then(RawDocument::from_value)
            })
            .collect();
        return Ok(out);
    }

    let items: Vec<Value> = serde_json::from_str(text)?;
    Ok(items.into_iter().map(RawDocument::from_value).collect())
}

pub fn read_dump(path: &Path) -> Result<Vec<Result<RawDocument, RecordError>>> {
    let text = fs::read_to_string(path).map_err(|e| Error::Input {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let json_lines = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jsonl"));

    parse_dump(&text, json_lines).map_err(|e| Error::Input {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
