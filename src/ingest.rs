// src/ingest.rs
use std::{
    collections::BTreeMap,
    panic::{self, AssertUnwindSafe},
    path::PathBuf,
    sync::{ mpsc, Arc, atomic::{ AtomicUsize, Ordering }},
    thread,
};

use tracing::{info, warn};

use crate::{
    config::IngestOptions,
    data::RawDocument,
    engine::{build_record, DocumentRecord, TurnRow},
    error::{ProcessError, RecordError, Result},
    progress::Progress,
    store::{AppendStats, Corpus},
};

/// Records in input order plus everything that was skipped.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub records: Vec<DocumentRecord>,
    pub failures: Vec<ProcessError>,
}

/// Per-file result of writing a batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileSummary {
    pub path: PathBuf,
    pub stats: AppendStats,
    /// Rows in the file after this batch (or after it would have been written).
    pub total: usize,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub documents: usize,
    pub failed: usize,
    pub rows: usize,
    pub files: Vec<FileSummary>,
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| s!("unknown panic"))
}

/// Segment every parsed record on a small worker pool.
///
/// `docs` holds one slot per input record; slots that already failed to
/// parse are reported as failures without reaching a worker. Output order
/// follows input order regardless of which worker finished first.
pub fn process_documents(
    docs: Vec<std::result::Result<RawDocument, RecordError>>,
    workers: usize,
    mut progress: Option<&mut dyn Progress>,
) -> BatchOutcome {
    let total = docs.len();
    if let Some(p) = progress.as_deref_mut() {
        p.begin(total);
    }

    let mut failures = Vec::new();
    let mut queue: Vec<(usize, RawDocument)> = Vec::with_capacity(total);
    for (index, slot) in docs.into_iter().enumerate() {
        match slot {
            Ok(doc) => queue.push((index, doc)),
            Err(source) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(index, "", &source.to_string());
                }
                warn!("record #{index} skipped: {source}");
                failures.push(ProcessError { index, url: s!(), source });
            }
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("{} readable, {} unreadable", queue.len(), failures.len()));
    }

    // Concurrency
    type Done = (usize, std::result::Result<DocumentRecord, ProcessError>);

    let queue = Arc::new(queue);
    let counter = Arc::new(AtomicUsize::new(0));
    let (res_tx, res_rx) = mpsc::channel::<Done>();

    let workers = workers.min(queue.len()).max(1);

    for _ in 0..workers {
        let queue = Arc::clone(&queue);
        let idx = Arc::clone(&counter);
        let tx = res_tx.clone();

        thread::spawn(move || {
            loop {
                let i = idx.fetch_add(1, Ordering::Relaxed);
                if i >= queue.len() {
                    break;
                }
                let (index, doc) = &queue[i];
                let result = panic::catch_unwind(AssertUnwindSafe(|| build_record(doc)))
                    .map_err(|payload| ProcessError {
                        index: *index,
                        url: doc.url.clone(),
                        source: RecordError::Panicked(panic_message(payload)),
                    });
                if tx.send((*index, result)).is_err() {
                    break;
                }
            }
        });
    }
    drop(res_tx); // main thread is sole receiver now

    // Aggregate results
    let mut done: BTreeMap<usize, DocumentRecord> = BTreeMap::new();
    for _ in 0..queue.len() {
        match res_rx.recv() {
            Ok((index, Ok(record))) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(index, &record.url);
                }
                done.insert(index, record);
            }
            Ok((index, Err(e))) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(index, &e.url, &e.source.to_string());
                }
                warn!("{e}");
                failures.push(e);
            }
            Err(_) => break, // workers ended early; bail gracefully
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    failures.sort_by_key(|e| e.index);
    BatchOutcome { records: done.into_values().collect(), failures }
}

/// Flatten records into rows, grouped by the corpus file they belong to.
/// Groups keep first-seen file order; rows keep record and turn order.
pub fn rows_by_file(records: &[DocumentRecord], opts: &IngestOptions) -> Vec<(PathBuf, Vec<TurnRow>)> {
    let mut groups: Vec<(PathBuf, Vec<TurnRow>)> = Vec::new();
    for record in records {
        let path = opts.corpus_path(Some(record.language));
        let rows = record.rows();
        match groups.iter_mut().find(|(p, _)| *p == path) {
            Some((_, group)) => group.extend(rows),
            None => groups.push((path, rows)),
        }
    }
    groups
}

/// Process a batch and append it to the corpus.
///
/// Per-record failures are counted and logged; a corpus that cannot be read
/// or written fails the whole run.
pub fn run(
    docs: Vec<std::result::Result<RawDocument, RecordError>>,
    opts: &IngestOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let outcome = process_documents(docs, opts.workers, progress);

    let mut summary = RunSummary {
        documents: outcome.records.len(),
        failed: outcome.failures.len(),
        ..RunSummary::default()
    };

    for (path, rows) in rows_by_file(&outcome.records, opts) {
        summary.rows += rows.len();
        let mut corpus = Corpus::open(&path, opts.format.delim())?;
        let (stats, total) = if opts.dry_run {
            let (fresh, duplicates) = corpus.fresh_rows(&rows);
            (AppendStats { appended: fresh.len(), duplicates }, corpus.len() + fresh.len())
        } else {
            let stats = corpus.append(&rows)?;
            (stats, corpus.len())
        };
        summary.files.push(FileSummary { path, stats, total });
    }

    info!(
        "ingest: {} document(s), {} failed, {} row(s){}",
        summary.documents,
        summary.failed,
        summary.rows,
        if opts.dry_run { " (dry run)" } else { "" }
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::engine::Language;

    fn doc(url: &str, language: Language, lines: &[&str]) -> RawDocument {
        RawDocument {
            title: s!("Foreign Ministry Spokesperson Geng Shuang's Regular Press Conference on July 3, 2020"),
            raw_date: None,
            lines: lines.iter().map(|l| s!(*l)).collect(),
            url: s!(url),
            language,
            scrape_timestamp: NaiveDate::from_ymd_opt(2020, 7, 4).unwrap(),
        }
    }

    #[derive(Default)]
    struct Recorder {
        total: usize,
        done: Vec<usize>,
        failed: Vec<usize>,
        finished: bool,
    }

    impl Progress for Recorder {
        fn begin(&mut self, total: usize) { self.total = total; }
        fn item_done(&mut self, index: usize, _url: &str) { self.done.push(index); }
        fn item_failed(&mut self, index: usize, _url: &str, _reason: &str) { self.failed.push(index); }
        fn finish(&mut self) { self.finished = true; }
    }

    #[test]
    fn order_is_preserved_across_workers() {
        let docs: Vec<_> = (0..25)
            .map(|i| Ok(doc(&format!("u{i}"), Language::English, &["Q: hi", "A: hello"])))
            .collect();
        let out = process_documents(docs, 4, None);
        assert!(out.failures.is_empty());
        let urls: Vec<_> = out.records.iter().map(|r| r.url.clone()).collect();
        let expected: Vec<_> = (0..25).map(|i| format!("u{i}")).collect();
        assert_eq!(urls, expected);
    }

    #[test]
    fn bad_slots_do_not_stop_the_batch() {
        let docs = vec![
            Ok(doc("u0", Language::English, &["Q: hi"])),
            Err(RecordError::MissingTitle),
            Ok(doc("u2", Language::English, &["A: hello"])),
        ];
        let mut rec = Recorder::default();
        let out = process_documents(docs, 2, Some(&mut rec));
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.failures.len(), 1);
        assert_eq!(out.failures[0].index, 1);
        assert_eq!(rec.total, 3);
        assert_eq!(rec.failed, vec![1]);
        rec.done.sort_unstable();
        assert_eq!(rec.done, vec![0, 2]);
        assert!(rec.finished);
    }

    #[test]
    fn empty_batch() {
        let out = process_documents(Vec::new(), 4, None);
        assert!(out.records.is_empty() && out.failures.is_empty());
    }

    #[test]
    fn rows_split_by_language() {
        let docs = vec![
            Ok(doc("en1", Language::English, &["Q: hi", "A: hello"])),
            Ok(doc("ch1", Language::Chinese, &["记者：你好。", "答：你好。"])),
            Ok(doc("en2", Language::English, &["Q: bye"])),
        ];
        let out = process_documents(docs, 2, None);
        let opts = IngestOptions::default();
        let groups = rows_by_file(&out.records, &opts);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, opts.corpus_path(Some(Language::English)));
        assert_eq!(groups[0].1.len(), 3);
        assert_eq!(groups[1].1.len(), 2);
    }
}
