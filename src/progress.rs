// src/progress.rs
use crate::roster::TableKind;

/// Progress reporting for roster refreshes.
/// Frontends (GUI/CLI) implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of tables to fetch.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One table arrived and parsed.
    fn item_done(&mut self, _table: TableKind) {}

    /// One table could not be fetched.
    fn item_failed(&mut self, _table: TableKind, _err: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
