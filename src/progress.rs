// src/progress.rs
/// Progress reporting for the mailing loop (and any other per-item stage).
/// The CLI prints; tests record; `NullProgress` ignores.
pub trait Progress {
    /// Called before the first item with the number of items.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called as each item (a recipient address) is processed.
    fn item_done(&mut self, _item: &str) {}

    /// Called after the last item.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Prints each item on its own line to stdout.
pub struct PrintProgress;
impl Progress for PrintProgress {
    fn log(&mut self, msg: &str) { println!("{msg}"); }
    fn item_done(&mut self, item: &str) { println!("{item}"); }
}
