// src/engine/language.rs
//
// Per-script turn boundary rules. A document picks its strategy once;
// the classifier never branches on the language itself.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Path segment that only the Chinese-language press pages live under.
const CHINESE_SITE_SEGMENT: &str = "/web/";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Language { English, Chinese }

impl Language {
    pub fn label(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Chinese => "Chinese",
        }
    }

    /// Accepts the crawler's `lang` values plus short codes.
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Some(Language::English),
            "chinese" | "zh" | "ch" | "cn" => Some(Language::Chinese),
            _ => None,
        }
    }

    /// Fallback when a record carries no `lang` field.
    pub fn from_url(url: &str) -> Self {
        if url.contains(CHINESE_SITE_SEGMENT) { Language::Chinese } else { Language::English }
    }

    /// Short file-stem suffix for per-language corpus files.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Chinese => "ch",
        }
    }

    pub fn strategy(self) -> &'static LanguageStrategy {
        static ENGLISH: OnceLock<LanguageStrategy> = OnceLock::new();
        static CHINESE: OnceLock<LanguageStrategy> = OnceLock::new();
        match self {
            Language::English => ENGLISH.get_or_init(LanguageStrategy::english),
            Language::Chinese => CHINESE.get_or_init(LanguageStrategy::chinese),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Boundary pattern, colon and answer marker for one script.
#[derive(Debug)]
pub struct LanguageStrategy {
    pub language: Language,
    /// Separator between a speaker label and the utterance.
    pub colon: char,
    /// Prefix the site uses for the spokesperson's turns.
    pub answer_marker: &'static str,
    /// Prefixes that name the questioner without a bold run.
    pub question_markers: &'static [&'static str],
    speaker_label: Regex,
}

impl LanguageStrategy {
    fn english() -> Self {
        Self {
            language: Language::English,
            colon: ':',
            answer_marker: "A:",
            question_markers: &["Q:"],
            // "Q:", "Reuters:", "China Daily:"
            speaker_label: compile(r"^[A-Za-z ]{1,50}:"),
        }
    }

    fn chinese() -> Self {
        Self {
            language: Language::Chinese,
            colon: '：',
            answer_marker: "答：",
            question_markers: &["问：", "记者："],
            // "记者：", "新华社记者："
            speaker_label: compile(r"^\p{Han}{1,15}："),
        }
    }

    /// Whether the line opens with a short speaker label.
    pub fn starts_with_speaker_label(&self, text: &str) -> bool {
        self.speaker_label.is_match(text)
    }

    pub fn starts_with_answer_marker(&self, text: &str) -> bool {
        text.starts_with(self.answer_marker)
    }

    pub fn starts_with_question_marker(&self, text: &str) -> bool {
        self.question_markers.iter().any(|m| text.starts_with(m))
    }

    /// `"<name><colon>"` prefix, e.g. `"Geng Shuang:"` or `"耿爽："`.
    pub fn starts_with_name_label(&self, text: &str, name: &str) -> bool {
        text.strip_prefix(name)
            .is_some_and(|rest| rest.starts_with(self.colon))
    }
}

fn compile(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(re) => re,
        // patterns are literals in this file
        Err(e) => panic!("invalid speaker-label pattern {pattern:?}: {e}"),
    }
}
