// src/engine/mod.rs
//! Transcript segmentation engine.
//!
//! ```text
//! RawDocument ─ core::normalize_line ─▶ NormalizedLine*
//!             ─ specs::speakers      ─▶ SpeakerIdentity
//!             ─ classify + segment   ─▶ Turn*
//!             ─ specs::title         ─▶ date / topic / event type
//!                                    ─▶ DocumentRecord ─ rows() ─▶ TurnRow*
//! ```
//!
//! Everything here is synchronous and free of shared state, so documents
//! can be processed on any thread in any order. Turn order inside one
//! document is fixed by the fold in [`segment`].

pub mod classify;
pub mod document;
pub mod language;
pub mod segment;
pub mod types;

pub use classify::{Classification, TurnClassifier};
pub use document::build_record;
pub use language::{Language, LanguageStrategy};
pub use segment::{segment, Segmenter};
pub use types::*;
