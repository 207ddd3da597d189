// src/log.rs
//
// Debug log at .store/debug.log, lines stamped with time since start.
// Level comes from RUST_LOG (default: info).

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::Uptime;

use crate::config::consts::{LOG_FILE, STORE_DIR};

const DEFAULT_FILTER: &str = "info";

pub fn default_log_path() -> PathBuf {
    Path::new(STORE_DIR).join(LOG_FILE)
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber, appending to `path`.
///
/// Falls back to stderr when the log file cannot be opened. Calling this
/// twice is harmless; the second call is ignored.
pub fn init(path: &Path) {
    let file = path
        .parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|_| OpenOptions::new().create(true).append(true).open(path));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_timer(Uptime::default())
        .with_target(false);

    let installed = match file {
        Ok(f) => builder.with_ansi(false).with_writer(Mutex::new(f)).try_init(),
        Err(e) => {
            eprintln!("Warning: cannot open {} ({e}); logging to stderr", path.display());
            builder.with_writer(std::io::stderr).try_init()
        }
    };
    // Already installed (tests, embedding callers): keep the existing one.
    if let Err(e) = installed {
        tracing::debug!("log subscriber already set: {e}");
    }
}
