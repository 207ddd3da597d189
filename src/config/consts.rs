// src/config/consts.rs

// Local state (debug log lives here)
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

// Corpus
pub const DEFAULT_OUT_DIR: &str = "out";
pub const CORPUS_STEM: &str = "corpus";

// Processing
pub const WORKERS: usize = 4;
