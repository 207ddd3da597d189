// src/store.rs
//
// Append-only corpus file. Rows are only ever added; a row whose full tuple
// is already present (on disk or earlier in the same batch) is dropped, so
// the first occurrence wins. One `Corpus` per file; it is the file's only
// writer for the duration of a run.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::csv::{detect_headers, read_rows};
use crate::engine::TurnRow;
use crate::error::{Error, Result};
use crate::file::{append_rows, write_rows_start};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataSet {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

/// Outcome of one [`Corpus::append`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AppendStats {
    pub appended: usize,
    pub duplicates: usize,
}

/// Read a corpus file. A missing file is an empty dataset; anything else
/// that stops us reading it is an error, since dedupe needs every prior row.
pub fn load_dataset(path: &Path, sep: char) -> Result<DataSet> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(DataSet::default()),
        Err(e) => return Err(corpus_err(path, e)),
    };
    let parsed = read_rows(BufReader::new(file), sep).map_err(|e| corpus_err(path, e))?;
    let (headers, rows) = detect_headers(parsed, &TurnRow::HEADERS);

    if headers.is_none() && !rows.is_empty() {
        return Err(corpus_err(path, "first row is not the expected header"));
    }
    Ok(DataSet { headers, rows })
}

#[derive(Debug)]
pub struct Corpus {
    path: PathBuf,
    sep: char,
    seen: HashSet<Vec<String>>,
    rows_on_disk: usize,
    has_header: bool,
}

impl Corpus {
    pub fn open(path: impl Into<PathBuf>, sep: char) -> Result<Self> {
        let path = path.into();
        let ds = load_dataset(&path, sep)?;
        let rows_on_disk = ds.rows.len();
        let seen: HashSet<Vec<String>> = ds.rows.into_iter().collect();
        if seen.len() < rows_on_disk {
            debug!("{}: {} duplicate rows already on disk", path.display(), rows_on_disk - seen.len());
        }
        Ok(Self { path, sep, seen, rows_on_disk, has_header: ds.headers.is_some() })
    }

    /// Rows in the file, counting any duplicates written by older tools.
    pub fn len(&self) -> usize {
        self.rows_on_disk
    }

    pub fn is_empty(&self) -> bool {
        self.rows_on_disk == 0
    }

    /// Rows of `rows` that would be appended, in order, plus the duplicate count.
    pub fn fresh_rows(&self, rows: &[TurnRow]) -> (Vec<Vec<String>>, usize) {
        let mut batch_seen: HashSet<Vec<String>> = HashSet::new();
        let mut fresh = Vec::new();
        let mut duplicates = 0;
        for row in rows {
            let fields = row.to_fields();
            if self.seen.contains(&fields) || !batch_seen.insert(fields.clone()) {
                duplicates += 1;
            } else {
                fresh.push(fields);
            }
        }
        (fresh, duplicates)
    }

    pub fn append(&mut self, rows: &[TurnRow]) -> Result<AppendStats> {
        let (fresh, duplicates) = self.fresh_rows(rows);

        if !fresh.is_empty() {
            if !self.has_header {
                write_rows_start(&self.path, Some(TurnRow::headers().as_slice()), self.sep)?;
                self.has_header = true;
            }
            append_rows(&self.path, &fresh, self.sep)?;
        }

        let appended = fresh.len();
        self.rows_on_disk += appended;
        self.seen.extend(fresh);
        info!(
            "{}: appended {appended}, skipped {duplicates} duplicate(s), {} total",
            self.path.display(),
            self.rows_on_disk
        );
        Ok(AppendStats { appended, duplicates })
    }
}

fn corpus_err(path: &Path, reason: impl ToString) -> Error {
    Error::Corpus { path: path.to_path_buf(), reason: reason.to_string() }
}
