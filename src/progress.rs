/// Lightweight progress reporting used by long-running jobs (fetch/import).
/// Frontends (GUI/CLI) implement this to surface status to operators.
pub trait Progress {
    /// Called at the start with the total number of sources (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One source finished and its rows were written.
    fn item_done(&mut self, _label: &str) {}

    /// One source failed or was skipped; the batch continues.
    fn item_failed(&mut self, _label: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Prints one line per event to stdout. Used by the CLI.
#[derive(Default)]
pub struct ConsoleProgress {
    done: usize,
    failed: usize,
    total: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }
    fn item_done(&mut self, label: &str) {
        self.done += 1;
        println!("[ok]   {label} ({}/{})", self.done + self.failed, self.total);
    }
    fn item_failed(&mut self, label: &str, reason: &str) {
        self.failed += 1;
        println!("[fail] {label}: {reason} ({}/{})", self.done + self.failed, self.total);
    }
    fn finish(&mut self) {
        println!("Done: {} ok, {} failed", self.done, self.failed);
    }
}
