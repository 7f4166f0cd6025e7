// src/scrape/acquire.rs
use std::{collections::HashSet, fs, path::{Path, PathBuf}, time::Duration};

use tracing::{debug, info, warn};

use crate::{
    api::{Card, MetadataSource},
    config::ScrapeConfig,
    core::{net::Fetch, validate::validate},
    error::{Result, ScrapeError},
    file::{card_image_path, ensure_directory, remove_if_exists},
    manifest::{CardEntry, Manifest},
    progress::{NullProgress, Progress},
};

/// Pulls one race worth of cards: listing, then art, then validation.
pub struct Acquirer<'a> {
    source: &'a dyn MetadataSource,
    fetcher: &'a dyn Fetch,
    images_dir: PathBuf,
    attempts: u32,
    timeout: Duration,
}

impl<'a> Acquirer<'a> {
    pub fn new(
        source: &'a dyn MetadataSource,
        fetcher: &'a dyn Fetch,
        images_dir: impl Into<PathBuf>,
        attempts: u32,
        timeout: Duration,
    ) -> Self {
        Self { source, fetcher, images_dir: images_dir.into(), attempts: attempts.max(1), timeout }
    }

    pub fn from_config(
        source: &'a dyn MetadataSource,
        fetcher: &'a dyn Fetch,
        cfg: &ScrapeConfig,
    ) -> Self {
        Self::new(source, fetcher, cfg.images_dir.clone(), cfg.attempts, cfg.timeout())
    }

    pub fn acquire(&self, category: &str) -> Result<Manifest> {
        self.acquire_with(category, &mut NullProgress)
    }

    /// Fetch every card listed under `category` and keep the ones whose art
    /// downloads and decodes.
    ///
    /// Source trouble (bad status, no `data`, unreadable JSON) yields an empty
    /// manifest and touches nothing on disk. Per-card network and decode
    /// failures are retried, then the card is dropped. Only local storage
    /// errors come back as `Err`.
    pub fn acquire_with(&self, category: &str, progress: &mut dyn Progress) -> Result<Manifest> {
        self.acquire_tracked(category, progress, &mut HashSet::new())
    }

    /// `acquire_with`, sharing `saved` across calls of one run. A path in
    /// `saved` already holds a validated image and is reused as-is, so a
    /// repeated race cannot delete a file an earlier entry points to.
    pub(super) fn acquire_tracked(
        &self,
        category: &str,
        progress: &mut dyn Progress,
        saved: &mut HashSet<PathBuf>,
    ) -> Result<Manifest> {
        let cards = match self.source.cards_for(category) {
            Ok(cards) => cards,
            Err(ScrapeError::EmptySource(_)) => {
                warn!(category, "no cards found for race");
                return Ok(Manifest::new());
            }
            Err(e @ (ScrapeError::Http { .. } | ScrapeError::Network { .. } | ScrapeError::Json(_))) => {
                warn!(category, error = %e, "card source unavailable, skipping race");
                return Ok(Manifest::new());
            }
            Err(e) => return Err(e),
        };

        info!(category, listed = cards.len(), "fetching race");
        progress.begin_category(category, cards.len());

        let mut out = Manifest::new();
        let mut dir_ready = false;

        for card in &cards {
            if let Some(entry) = self.acquire_card(category, card, &mut dir_ready, saved, progress)? {
                out.push(entry);
            }
            progress.card_done();
        }

        info!(category, kept = out.len(), listed = cards.len(), "race done");
        progress.end_category(category, out.len());
        Ok(out)
    }

    fn acquire_card(
        &self,
        category: &str,
        card: &Card,
        dir_ready: &mut bool,
        saved: &mut HashSet<PathBuf>,
        progress: &mut dyn Progress,
    ) -> Result<Option<CardEntry>> {
        let (Some(id), Some(url)) = (card.id, card.cropped_url()) else {
            return Ok(None);
        };

        let path = card_image_path(&self.images_dir, category, id);
        if saved.contains(&path) {
            debug!(id, path = %path.display(), "already saved this run");
            return Ok(Some(entry_for(id, card, path)));
        }
        if !*dir_ready {
            if let Some(dir) = path.parent() {
                ensure_directory(dir)?;
            }
            *dir_ready = true;
        }

        if !self.download_verified(url, &path, id, &card.name)? {
            warn!(id, name = %card.name, "card discarded after failed attempts");
            progress.card_discarded(id, &card.name);
            return Ok(None);
        }

        debug!(id, path = %path.display(), "saved");
        saved.insert(path.clone());
        Ok(Some(entry_for(id, card, path)))
    }

    /// Up to `attempts` rounds of fetch → write → validate. Leaves no file
    /// behind when it returns `Ok(false)`.
    fn download_verified(&self, url: &str, path: &Path, id: u64, name: &str) -> Result<bool> {
        for attempt in 1..=self.attempts {
            match self.try_once(url, path) {
                Ok(()) => return Ok(true),
                Err(e @ (ScrapeError::Network { .. } | ScrapeError::Http { .. } | ScrapeError::Validation { .. })) => {
                    warn!(attempt, id, name, error = %e, "attempt failed");
                    remove_if_exists(path)?;
                }
                Err(e) => {
                    remove_if_exists(path)?;
                    return Err(e);
                }
            }
        }
        Ok(false)
    }

    fn try_once(&self, url: &str, path: &Path) -> Result<()> {
        let bytes = self.fetcher.fetch(url, self.timeout)?;
        fs::write(path, bytes)?;
        validate(path)
    }
}

fn entry_for(id: u64, card: &Card, image_path: PathBuf) -> CardEntry {
    CardEntry { id, name: card.name.clone(), category: card.race.clone(), image_path }
}
