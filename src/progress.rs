// src/progress.rs
/// Lightweight progress reporting used by batch processing.
/// Frontends (CLI, tests) implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of documents.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One document was segmented. `index` is its position in the input.
    fn item_done(&mut self, _index: usize, _url: &str) {}

    /// One document was skipped.
    fn item_failed(&mut self, _index: usize, _url: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}
