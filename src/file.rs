// src/file.rs

use std::{
    fs::{self, File, OpenOptions},
    io::{BufWriter, Write},
    path::Path,
};

use crate::csv::write_rows;
use crate::error::{Error, Result};

/// Ensure parent dir exists; create/truncate file; optionally write header.
pub fn write_rows_start(path: &Path, headers: Option<&[String]>, sep: char) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let file = File::create(path)?; // truncate/overwrite
    let mut out = BufWriter::new(file);
    write_rows(&mut out, headers, &[], sep)?;
    out.flush()?;
    Ok(())
}

/// Append rows to an existing CSV/TSV file (must be created already).
pub fn append_rows(path: &Path, rows: &[Vec<String>], sep: char) -> Result<()> {
    let file = OpenOptions::new().append(true).open(path)?;
    let mut out = BufWriter::new(file);
    write_rows(&mut out, None, rows, sep)?;
    out.flush()?;
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::Corpus {
            path: dir.to_path_buf(),
            reason: s!("path exists but is not a directory"),
        });
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
