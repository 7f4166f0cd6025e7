// src/progress.rs
/// Progress reporting for a corpus build.
/// Frontends implement this to surface status; everything defaults to no-op.
pub trait Progress {
    /// A race is about to be fetched; `total` is how many cards it lists.
    fn begin_category(&mut self, _category: &str, _total: usize) {}

    /// One listed card was handled, kept or not.
    fn card_done(&mut self) {}

    /// Every attempt for this card failed; it is not in the manifest.
    fn card_discarded(&mut self, _id: u64, _name: &str) {}

    /// Race finished with `kept` cards.
    fn end_category(&mut self, _category: &str, _kept: usize) {}

    /// Whole run finished, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
