// src/csv.rs
use std::io::{Read, Write};

use ::csv::{ReaderBuilder, Terminator, WriterBuilder};

use crate::error::Result;

fn delim_byte(sep: char) -> u8 {
    // ',' and '\t' are the only separators the options expose
    if sep.is_ascii() { sep as u8 } else { b',' }
}

/* ---------------- Parsing ---------------- */

/// All records, headers included, as raw cells. Ragged rows are allowed.
pub fn read_rows<R: Read>(rdr: R, sep: char) -> Result<Vec<Vec<String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delim_byte(sep))
        .from_reader(rdr);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Split off the first row when it equals `expected`.
pub fn detect_headers(
    mut rows: Vec<Vec<String>>,
    expected: &[&str],
) -> (Option<Vec<String>>, Vec<Vec<String>>) {
    let is_header = rows
        .first()
        .is_some_and(|first| first.iter().map(String::as_str).eq(expected.iter().copied()));
    if is_header {
        let header = rows.remove(0);
        return (Some(header), rows);
    }
    (None, rows)
}

/* ---------------- Writing ---------------- */

/// Write headers (if any) and rows. Quoting is left to the csv writer.
pub fn write_rows<W: Write>(
    w: W,
    headers: Option<&[String]>,
    rows: &[Vec<String>],
    sep: char,
) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(delim_byte(sep))
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(w);

    if let Some(h) = headers {
        writer.write_record(h)?;
    }
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows_to_string(headers: Option<&[String]>, rows: &[Vec<String>], sep: char) -> Result<String> {
        let mut buf: Vec<u8> = Vec::new();
        write_rows(&mut buf, headers, rows, sep)?;
        Ok(String::from_utf8(buf).unwrap())
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn quoted_fields_survive() {
        let rows = vec![row(&["a,b", "say \"hi\"", "line\nbreak", ""])];
        let text = rows_to_string(None, &rows, ',').unwrap();
        let back = read_rows(text.as_bytes(), ',').unwrap();
        assert_eq!(back, rows);
    }

    #[test]
    fn tsv_and_headers() {
        let headers = row(&["x", "y"]);
        let rows = vec![row(&["1", "2"])];
        let text = rows_to_string(Some(headers.as_slice()), &rows, '\t').unwrap();
        assert_eq!(text, "x\ty\n1\t2\n");

        let parsed = read_rows(text.as_bytes(), '\t').unwrap();
        let (h, r) = detect_headers(parsed, &["x", "y"]);
        assert_eq!(h, Some(headers));
        assert_eq!(r, rows);
    }

    #[test]
    fn detect_headers_leaves_data_alone() {
        let (h, r) = detect_headers(vec![row(&["1", "2"])], &["x", "y"]);
        assert!(h.is_none());
        assert_eq!(r.len(), 1);
        let (h, r) = detect_headers(Vec::new(), &["x"]);
        assert!(h.is_none() && r.is_empty());
    }
}
