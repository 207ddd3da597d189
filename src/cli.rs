// src/cli.rs
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{eyre, WrapErr};
use tracing::info;

use crate::config::{ExportFormat, IngestOptions};
use crate::data::read_dump;
use crate::engine::build_record;
use crate::error::RecordError;
use crate::ingest;
use crate::log;
use crate::progress::Progress;
use crate::specs::speakers::SPOKESPERSONS;

#[derive(Parser, Debug)]
#[command(
    name = "fm_press",
    version,
    about = "Segment Foreign Ministry press-conference transcripts into question/answer turns"
)]
pub struct Cli {
    /// JSON file with ingest options; flags override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Segment a crawler dump and append the turns to the corpus
    Ingest {
        /// Crawler dump (.json array or .jsonl)
        input: PathBuf,

        /// Directory holding the corpus file(s)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        #[arg(long, value_enum)]
        format: Option<Format>,

        /// Write every language into one corpus file
        #[arg(long)]
        no_split: bool,

        #[arg(short, long)]
        workers: Option<usize>,

        /// Report what would be appended without touching the corpus
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the segmented turns of a dump without writing anything
    Show {
        input: PathBuf,

        /// One JSON record per line instead of a text listing
        #[arg(long)]
        json: bool,
    },
    /// List the known spokespersons
    Speakers,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Csv,
    Tsv,
}

impl From<Format> for ExportFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Csv => ExportFormat::Csv,
            Format::Tsv => ExportFormat::Tsv,
        }
    }
}

/// Progress on stderr; one line per skipped record, a counter otherwise.
struct CliProgress {
    total: usize,
    seen: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        eprintln!("Processing {total} document(s)");
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, _index: usize, _url: &str) {
        self.seen += 1;
        eprint!("\r[{}/{}]", self.seen, self.total);
    }

    fn item_failed(&mut self, index: usize, url: &str, reason: &str) {
        self.seen += 1;
        eprintln!("\rSkipped #{index} {url}: {reason}");
    }

    fn finish(&mut self) {
        eprintln!();
    }
}

pub fn run() -> color_eyre::Result<()> {
    let cli = Cli::parse();
    log::init(&log::default_log_path());

    let mut opts = match &cli.config {
        Some(path) => IngestOptions::load(path)
            .wrap_err_with(|| format!("loading options from {}", path.display()))?,
        None => IngestOptions::default(),
    };

    match cli.command {
        Command::Ingest { input, out_dir, format, no_split, workers, dry_run } => {
            if let Some(dir) = out_dir { opts.out_dir = dir; }
            if let Some(f) = format { opts.format = f.into(); }
            if no_split { opts.split_by_language = false; }
            if let Some(w) = workers { opts.workers = w; }
            if dry_run { opts.dry_run = true; }
            if opts.workers == 0 {
                return Err(eyre!("--workers must be at least 1"));
            }
            ingest_cmd(&input, &opts)
        }
        Command::Show { input, json } => show_cmd(&input, json),
        Command::Speakers => {
            for s in SPOKESPERSONS {
                println!("{}", s.canonical());
            }
            Ok(())
        }
    }
}

fn ingest_cmd(input: &Path, opts: &IngestOptions) -> color_eyre::Result<()> {
    info!("ingest {} into {}", input.display(), opts.out_dir.display());
    let docs = read_dump(input)?;

    let mut progress = CliProgress { total: 0, seen: 0 };
    let summary = ingest::run(docs, opts, Some(&mut progress))?;

    println!(
        "{} document(s) segmented, {} skipped, {} row(s)",
        summary.documents, summary.failed, summary.rows
    );
    let verb = if opts.dry_run { "would append" } else { "appended" };
    for f in &summary.files {
        println!(
            "  {}: {verb} {}, {} duplicate(s), {} row(s) total",
            f.path.display(),
            f.stats.appended,
            f.stats.duplicates,
            f.total
        );
    }
    Ok(())
}

fn show_cmd(input: &Path, json: bool) -> color_eyre::Result<()> {
    let docs = read_dump(input)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (index, slot) in docs.into_iter().enumerate() {
        let doc = match slot {
            Ok(d) => d,
            Err(e) => {
                report_skip(index, &e);
                continue;
            }
        };
        let record = build_record(&doc);

        if json {
            serde_json::to_writer(&mut out, &record)?;
            writeln!(out)?;
            continue;
        }

        writeln!(out, "# {}", record.title)?;
        writeln!(
            out,
            "# {} | {} | {} | {}",
            record.speaker.canonical_name.as_deref().unwrap_or(&record.speaker.original_name),
            record.date.map(|d| d.to_string()).unwrap_or_else(|| s!("-")),
            record.press_event_type,
            record.language
        )?;
        for turn in &record.turns {
            writeln!(out, "{:>3} {:<4} {}", turn.order, turn.kind, turn.text)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn report_skip(index: usize, e: &RecordError) {
    eprintln!("Skipped #{index}: {e}");
}
