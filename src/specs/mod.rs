// src/specs/mod.rs
//! # Page metadata specs
//!
//! Site-specific knowledge about how the ministry labels its press pages:
//! who is speaking, when, about what, and what kind of event it was.
//!
//! ## What lives here
//! - `speakers` – the closed bilingual spokesperson table and its lookup order
//!   (title first; Chinese pages may fall back to the opening body lines).
//! - `title` – date/topic extraction from English titles, date extraction
//!   from the Chinese `News_Body_Time` field, and event-type detection.
//!
//! ## What does **not** live here
//! - Markup cleanup (`core`), turn segmentation (`engine`), persistence (`store`).
//!
//! ## Conventions
//! - Nothing in here fails a document. Misses resolve to sentinels
//!   (`"Unknown"` speaker, no date, no topic, `Unknown` event type) and are
//!   logged at debug level.
pub mod speakers;
pub mod title;
