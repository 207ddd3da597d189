// src/engine/segment.rs
//
// Turn segmentation as a left fold over one document's lines.
// Blank lines are skipped; a boundary line closes the open turn and opens
// the next; anything else is appended to the open turn.

use crate::core::NormalizedLine;

use super::classify::TurnClassifier;
use super::types::{Turn, TurnKind, PARAGRAPH_BREAK};

#[derive(Debug)]
struct OpenTurn {
    text: String,
    kind: TurnKind,
}

/// Fold state. Owned and consumed per document.
#[derive(Debug, Default)]
pub struct Segmenter {
    open: Option<OpenTurn>,
    emitted: Vec<Turn>,
}

impl Segmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next 1-based order, for the turn currently open.
    fn order(&self) -> u32 {
        self.emitted.len() as u32 + 1
    }

    pub fn step(mut self, line: &NormalizedLine, classifier: &TurnClassifier<'_>) -> Self {
        if line.is_blank() {
            return self;
        }
        let decision = classifier.classify(line);

        match self.open.take() {
            None => {
                self.open = Some(OpenTurn { text: line.text.clone(), kind: decision.kind });
            }
            Some(current) if decision.is_boundary => {
                let order = self.order();
                self.emitted.push(Turn { text: current.text, order, kind: current.kind });
                self.open = Some(OpenTurn { text: line.text.clone(), kind: decision.kind });
            }
            Some(mut current) => {
                current.text.push_str(PARAGRAPH_BREAK);
                current.text.push_str(&line.text);
                self.open = Some(current);
            }
        }
        self
    }

    /// Flush the open turn. A document with no usable lines still yields one
    /// empty, unclassified turn.
    pub fn finish(mut self) -> Vec<Turn> {
        let order = self.order();
        let last = self.open.take().unwrap_or(OpenTurn {
            text: s!(),
            kind: TurnKind::Unclassified,
        });
        self.emitted.push(Turn { text: last.text, order, kind: last.kind });
        self.emitted
    }
}

/// Segment a whole document.
pub fn segment<'l, I>(lines: I, classifier: &TurnClassifier<'_>) -> Vec<Turn>
where
    I: IntoIterator<Item = &'l NormalizedLine>,
{
    lines
        .into_iter()
        .fold(Segmenter::new(), |acc, line| acc.step(line, classifier))
        .finish()
}
