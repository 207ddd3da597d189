// src/config/options.rs
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::consts::*;
use crate::engine::language::Language;
use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
}

/// Settings for one ingest run. Loadable from JSON; every field optional.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestOptions {
    /// Directory holding the corpus file(s).
    pub out_dir: PathBuf,
    pub format: ExportFormat,
    /// One corpus per language (`corpus_en`, `corpus_ch`) instead of one file.
    pub split_by_language: bool,
    pub workers: usize,
    /// Process and report, but leave the corpus untouched.
    pub dry_run: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            format: ExportFormat::Csv,
            split_by_language: true,
            workers: WORKERS,
            dry_run: false,
        }
    }
}

impl IngestOptions {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::Input {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Corpus file for `language`; `None` means the combined file.
    pub fn corpus_path(&self, language: Option<Language>) -> PathBuf {
        let stem = match language {
            Some(l) if self.split_by_language => join!(CORPUS_STEM, "_", l.code()),
            _ => s!(CORPUS_STEM),
        };
        self.out_dir.join(join!(&stem, ".", self.format.ext()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let opts: IngestOptions = serde_json::from_str(r#"{ "format": "tsv", "workers": 2 }"#).unwrap();
        assert_eq!(opts.format, ExportFormat::Tsv);
        assert_eq!(opts.workers, 2);
        assert!(opts.split_by_language);
        assert_eq!(opts.out_dir, PathBuf::from(DEFAULT_OUT_DIR));
    }

    #[test]
    fn corpus_paths() {
        let mut opts = IngestOptions::default();
        assert_eq!(
            opts.corpus_path(Some(Language::Chinese)),
            PathBuf::from("out").join("corpus_ch.csv")
        );
        opts.split_by_language = false;
        opts.format = ExportFormat::Tsv;
        assert_eq!(
            opts.corpus_path(Some(Language::English)),
            PathBuf::from("out").join("corpus.tsv")
        );
    }
}
