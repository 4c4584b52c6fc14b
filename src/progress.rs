// src/progress.rs
/// Lightweight progress reporting for long-running generation runs.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of host/version combinations.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one combination's declaration file has been written.
    fn item_done(&mut self, _host: &str, _version: u32, _path: &std::path::Path) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
