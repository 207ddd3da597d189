// src/engine/classify.rs

use crate::core::NormalizedLine;

use super::language::{Language, LanguageStrategy};
use super::types::{TurnKind, UNRESOLVED_SPEAKER};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Classification {
    /// The line opens a new turn.
    pub is_boundary: bool,
    /// Meaningful only when the line opens a turn.
    pub kind: TurnKind,
}

/// Boundary and kind decisions for the lines of one document.
#[derive(Clone, Debug)]
pub struct TurnClassifier<'a> {
    strategy: &'static LanguageStrategy,
    speaker: Option<&'a str>,
}

impl<'a> TurnClassifier<'a> {
    /// `speaker` is the resolved original name in the document's script.
    /// The unresolved sentinel and empty names never match a line.
    pub fn new(language: Language, speaker: &'a str) -> Self {
        let speaker = speaker.trim();
        let speaker = (!speaker.is_empty() && speaker != UNRESOLVED_SPEAKER).then_some(speaker);
        Self { strategy: language.strategy(), speaker }
    }

    pub fn is_boundary(&self, line: &NormalizedLine) -> bool {
        line.has_emphasis_marker || self.strategy.starts_with_speaker_label(&line.text)
    }

    pub fn is_answer(&self, text: &str) -> bool {
        if self.strategy.starts_with_answer_marker(text) {
            return true;
        }
        match self.speaker {
            // name anywhere in the line still counts (legacy rule)
            Some(name) => self.strategy.starts_with_name_label(text, name) || text.contains(name),
            None => false,
        }
    }

    pub fn classify(&self, line: &NormalizedLine) -> Classification {
        let kind = if self.is_answer(&line.text) {
            TurnKind::Answer
        } else if line.has_emphasis_marker || self.strategy.starts_with_question_marker(&line.text) {
            TurnKind::Question
        } else {
            TurnKind::Unclassified
        };
        Classification { is_boundary: self.is_boundary(line), kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str, emphasis: bool) -> NormalizedLine {
        NormalizedLine { text: s!(text), has_emphasis_marker: emphasis }
    }

    #[test]
    fn answer_marker_is_boundary_and_answer() {
        let en = TurnClassifier::new(Language::English, "Geng Shuang");
        let c = en.classify(&line("A:", false));
        assert!(c.is_boundary);
        assert_eq!(c.kind, TurnKind::Answer);

        let ch = TurnClassifier::new(Language::Chinese, "耿爽");
        let c = ch.classify(&line("答：", false));
        assert!(c.is_boundary);
        assert_eq!(c.kind, TurnKind::Answer);
    }

    #[test]
    fn plain_label_without_emphasis_is_unclassified() {
        let en = TurnClassifier::new(Language::English, "Geng Shuang");
        let c = en.classify(&line("Reuters: What is your comment?", false));
        assert!(c.is_boundary);
        assert_eq!(c.kind, TurnKind::Unclassified);
    }

    #[test]
    fn question_marker_without_emphasis_is_question() {
        let en = TurnClassifier::new(Language::English, "Geng Shuang");
        let c = en.classify(&line("Q: What is your comment?", false));
        assert!(c.is_boundary);
        assert_eq!(c.kind, TurnKind::Question);
    }

    #[test]
    fn emphasis_makes_question_and_boundary() {
        let en = TurnClassifier::new(Language::English, "Geng Shuang");
        let c = en.classify(&line("Follow-up question, please.", true));
        assert!(c.is_boundary);
        assert_eq!(c.kind, TurnKind::Question);
    }

    #[test]
    fn speaker_name_label_is_answer() {
        let en = TurnClassifier::new(Language::English, "Spokesperson");
        let c = en.classify(&line("Spokesperson: We have no comment.", false));
        assert!(c.is_boundary);
        assert_eq!(c.kind, TurnKind::Answer);
    }

    #[test]
    fn speaker_name_anywhere_is_answer() {
        // Legacy rule: a question quoting the spokesperson is read as an answer.
        let en = TurnClassifier::new(Language::English, "Geng Shuang");
        let c = en.classify(&line("Q: Geng Shuang, could you confirm?", true));
        assert_eq!(c.kind, TurnKind::Answer);
    }

    #[test]
    fn continuation_line_is_not_boundary() {
        let en = TurnClassifier::new(Language::English, "Geng Shuang");
        let c = en.classify(&line("In 2020, trade grew: slowly but steadily.", false));
        assert!(!c.is_boundary);
    }

    #[test]
    fn unresolved_speaker_never_matches() {
        let en = TurnClassifier::new(Language::English, UNRESOLVED_SPEAKER);
        let c = en.classify(&line("The outcome is Unknown at this point.", false));
        assert_eq!(c.kind, TurnKind::Unclassified);

        let blank = TurnClassifier::new(Language::English, "");
        assert!(!blank.is_answer("anything"));
    }

    #[test]
    fn chinese_labels() {
        let ch = TurnClassifier::new(Language::Chinese, "华春莹");
        let q = ch.classify(&line("记者：你好。", false));
        assert!(q.is_boundary);
        assert_eq!(q.kind, TurnKind::Question);

        let other = ch.classify(&line("路透社：请问。", false));
        assert!(other.is_boundary);
        assert_eq!(other.kind, TurnKind::Unclassified);

        let a = ch.classify(&line("华春莹：我们注意到了有关报道。", false));
        assert!(a.is_boundary);
        assert_eq!(a.kind, TurnKind::Answer);

        let cont = ch.classify(&line("中方的立场是一贯的。", false));
        assert!(!cont.is_boundary);
    }
}
