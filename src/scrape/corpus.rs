// src/scrape/corpus.rs
use std::{collections::HashSet, path::Path, thread, time::Duration};

use tracing::info;

use super::acquire::Acquirer;
use crate::{
    error::Result,
    manifest::Manifest,
    progress::{NullProgress, Progress},
};

/// Runs the acquirer over a list of races, one after another.
///
/// Strictly sequential, with `delay` slept between races: the card API's
/// rate limit is unknown.
pub struct CorpusDriver<'a> {
    acquirer: Acquirer<'a>,
    delay: Duration,
}

impl<'a> CorpusDriver<'a> {
    pub fn new(acquirer: Acquirer<'a>, delay: Duration) -> Self {
        Self { acquirer, delay }
    }

    pub fn build_corpus<S: AsRef<str>>(&self, categories: &[S]) -> Result<Manifest> {
        self.build_corpus_with(categories, &mut NullProgress)
    }

    /// Concatenate each race's cards in the order the races were given.
    ///
    /// A local storage error stops the run at that race. `progress.finish()`
    /// is called either way.
    pub fn build_corpus_with<S: AsRef<str>>(
        &self,
        categories: &[S],
        progress: &mut dyn Progress,
    ) -> Result<Manifest> {
        let built = self.run(categories, progress);
        progress.finish();

        let all = built?;
        info!(races = categories.len(), cards = all.len(), "corpus built");
        Ok(all)
    }

    fn run<S: AsRef<str>>(&self, categories: &[S], progress: &mut dyn Progress) -> Result<Manifest> {
        let mut all = Manifest::new();
        let mut saved = HashSet::new();

        for (i, category) in categories.iter().enumerate() {
            if i > 0 && !self.delay.is_zero() {
                thread::sleep(self.delay); // be polite
            }
            let part = self.acquirer.acquire_tracked(category.as_ref(), progress, &mut saved)?;
            all.append(part);
        }
        Ok(all)
    }

    /// Build, then write the manifest CSV to `manifest_path` (overwriting).
    pub fn build_and_save<S: AsRef<str>>(
        &self,
        categories: &[S],
        manifest_path: &Path,
        progress: &mut dyn Progress,
    ) -> Result<Manifest> {
        let manifest = self.build_corpus_with(categories, progress)?;
        manifest.save(manifest_path)?;
        info!(path = %manifest_path.display(), rows = manifest.len(), "manifest written");
        Ok(manifest)
    }
}
