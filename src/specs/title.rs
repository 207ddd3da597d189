// src/specs/title.rs
//
// Date, topic and event type from the page title (and, for Chinese pages,
// the News_Body_Time field the crawler scrapes separately).

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use crate::core::html;
use crate::engine::language::Language;
use crate::engine::types::PressEventType;

const EN_TITLE_TAIL: &str = " on ";

/// Date and topic read off one document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TitleFacts {
    pub date: Option<NaiveDate>,
    pub topic: Option<String>,
}

pub fn facts(title: &str, raw_date: Option<&str>, language: Language) -> TitleFacts {
    match language {
        Language::English => english_facts(title),
        Language::Chinese => TitleFacts {
            date: raw_date
                .and_then(|d| numeric_date(&html::strip_tags(d)))
                .or_else(|| numeric_date(title)),
            topic: None,
        },
    }
}

/// Text after the first `" on "`: a date if it mentions "20", else a topic.
///
/// Known defect kept for compatibility: a topic such as "the G20 Summit"
/// is taken as a date candidate, fails to parse, and is lost.
pub fn english_facts(title: &str) -> TitleFacts {
    let Some(at) = title.find(EN_TITLE_TAIL) else {
        debug!("title has no date/topic tail: {title}");
        return TitleFacts::default();
    };
    let tail = title[at + EN_TITLE_TAIL.len()..].trim();
    if tail.is_empty() {
        return TitleFacts::default();
    }

    if tail.contains("20") {
        let date = english_date(tail);
        if date.is_none() {
            debug!("date-like title tail did not parse: {tail}");
        }
        TitleFacts { date, topic: None }
    } else {
        TitleFacts { date: None, topic: Some(s!(tail)) }
    }
}

/// "July 3, 2020", "Jul. 3, 2020", "3 July 2020", "2020-07-03".
pub fn english_date(s: &str) -> Option<NaiveDate> {
    static MONTH_FIRST: OnceLock<Regex> = OnceLock::new();
    static DAY_FIRST: OnceLock<Regex> = OnceLock::new();

    let month_first = MONTH_FIRST.get_or_init(|| pattern(r"([A-Za-z]+)\.? +(\d{1,2}),? +(\d{4})"));
    if let Some(c) = month_first.captures(s) {
        let joined = format!("{} {} {}", &c[1], &c[2], &c[3]);
        if let Ok(d) = NaiveDate::parse_from_str(&joined, "%B %d %Y") {
            return Some(d);
        }
    }

    let day_first = DAY_FIRST.get_or_init(|| pattern(r"(\d{1,2}) +([A-Za-z]+)\.?,? +(\d{4})"));
    if let Some(c) = day_first.captures(s) {
        let joined = format!("{} {} {}", &c[2], &c[1], &c[3]);
        if let Ok(d) = NaiveDate::parse_from_str(&joined, "%B %d %Y") {
            return Some(d);
        }
    }

    numeric_date(s)
}

/// `2020-07-03`, `2020/7/3`, `2020.07.03` or `2020年7月3日`.
pub fn numeric_date(s: &str) -> Option<NaiveDate> {
    static NUMERIC: OnceLock<Regex> = OnceLock::new();
    let re = NUMERIC.get_or_init(|| pattern(r"(\d{4})\s*[-/.年]\s*(\d{1,2})\s*[-/.月]\s*(\d{1,2})"));
    let c = re.captures(s)?;
    let y = c[1].parse().ok()?;
    let m = c[2].parse().ok()?;
    let d = c[3].parse().ok()?;
    NaiveDate::from_ymd_opt(y, m, d)
}

pub fn event_type(title: &str, language: Language) -> PressEventType {
    let (regular, remarks): (&[&str], &[&str]) = match language {
        Language::English => (&["Regular Press Conference"], &["Remarks"]),
        Language::Chinese => (&["例行记者会"], &["答记者问", "讲话", "表示"]),
    };
    if regular.iter().any(|p| title.contains(p)) {
        PressEventType::RegularPressConference
    } else if remarks.iter().any(|p| title.contains(p)) {
        PressEventType::Remarks
    } else {
        PressEventType::Unknown
    }
}

fn pattern(p: &str) -> Regex {
    match Regex::new(p) {
        Ok(re) => re,
        Err(e) => panic!("invalid date pattern {p:?}: {e}"),
    }
}
