// src/progress.rs
/// Status sink for the long-running loops (scrape, eval).
/// The CLI prints through it; library callers pass `None`.
pub trait Progress {
    /// Number of steps, when the loop is bounded.
    fn begin(&mut self, _total: Option<usize>) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One page handled: its item number and how many reviews were stored.
    fn item_done(&mut self, _item_number: u32, _inserted: usize) {}

    /// Called once the loop ends.
    fn finish(&mut self) {}
}
