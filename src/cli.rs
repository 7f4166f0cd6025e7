// src/cli.rs
use std::path::{Path, PathBuf};

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    api::CardApi,
    config::{consts::{RACES, STORE_DIR}, ScrapeConfig},
    core::net::HttpFetcher,
    error::Result,
    manifest::{CategoryIndexMap, EncodedTable},
    progress::Progress,
    scrape::{Acquirer, CorpusDriver},
};

/// Scrape YGOPRODeck card art by race into a verified image corpus.
#[derive(Parser, Debug, Default)]
#[command(name = "ygo_scrape", version, about)]
pub struct Params {
    /// Race to scrape; repeat for several. Default: every race.
    #[arg(long = "race", value_name = "RACE")]
    pub races: Vec<String>,

    /// Root directory for downloaded art (one subdirectory per race).
    #[arg(long, value_name = "DIR")]
    pub images_dir: Option<PathBuf>,

    /// Manifest CSV to write (overwritten).
    #[arg(short = 'o', long = "out", value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Also write the manifest with a numeric race_code column.
    #[arg(long, value_name = "FILE")]
    pub encoded: Option<PathBuf>,

    /// Download attempts per card.
    #[arg(long)]
    pub attempts: Option<u32>,

    /// Pause between races, in milliseconds.
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Per-request timeout, in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Config file to use instead of .store/config.toml.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the known races and exit.
    #[arg(long)]
    pub list_races: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

impl Params {
    /// Flags win over file and environment.
    pub fn apply(&self, cfg: &mut ScrapeConfig) {
        if !self.races.is_empty() { cfg.races = self.races.clone(); }
        if let Some(d) = &self.images_dir { cfg.images_dir = d.clone(); }
        if let Some(o) = &self.out { cfg.manifest_path = o.clone(); }
        if let Some(a) = self.attempts { cfg.attempts = a; }
        if let Some(d) = self.delay_ms { cfg.delay_ms = d; }
        if let Some(t) = self.timeout_secs { cfg.timeout_secs = t; }
    }
}

pub fn run(params: Params) -> Result<()> {
    if params.list_races {
        for race in RACES {
            println!("{race}");
        }
        return Ok(());
    }

    let mut cfg = match &params.config {
        Some(path) => ScrapeConfig::load_from(path)?,
        None => ScrapeConfig::load()?,
    };
    params.apply(&mut cfg);
    cfg.validate()?;

    let _log = crate::log::init(Path::new(STORE_DIR), params.verbose)?;

    let http = HttpFetcher::new(&cfg.user_agent)?;
    let api = CardApi::new(&http, cfg.api_base.clone(), cfg.timeout());
    let driver = CorpusDriver::new(Acquirer::from_config(&api, &http, &cfg), cfg.delay());

    let mut bar = BarProgress::default();
    let manifest = driver.build_and_save(cfg.races.as_slice(), &cfg.manifest_path, &mut bar)?;
    let classes = CategoryIndexMap::build(&manifest);

    if let Some(path) = &params.encoded {
        EncodedTable::encode(&manifest, &classes)?.save(path)?;
        println!("Wrote {}", path.display());
    }

    println!("Wrote {} cards to {}", manifest.len(), cfg.manifest_path.display());
    for (label, index) in classes.iter() {
        println!("{index:>3}  {label}");
    }
    Ok(())
}

/* ---------------- Terminal progress ---------------- */

/// One bar per race, like a `tqdm` loop.
#[derive(Default)]
struct BarProgress {
    bar: Option<ProgressBar>,
    discarded: usize,
}

impl Progress for BarProgress {
    fn begin_category(&mut self, category: &str, total: usize) {
        let style = ProgressStyle::with_template("{msg:>16} [{bar:40}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        let bar = ProgressBar::new(total as u64).with_style(style);
        bar.set_message(category.to_string());
        self.bar = Some(bar);
    }

    fn card_done(&mut self) {
        if let Some(b) = &self.bar { b.inc(1); }
    }

    fn card_discarded(&mut self, id: u64, name: &str) {
        self.discarded += 1;
        if let Some(b) = &self.bar {
            b.println(format!("discarded after failures: {name} ({id})"));
        }
    }

    fn end_category(&mut self, _category: &str, _kept: usize) {
        if let Some(b) = self.bar.take() { b.finish(); }
    }

    fn finish(&mut self) {
        if self.discarded > 0 {
            eprintln!("{} card(s) discarded", self.discarded);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let params = Params::try_parse_from([
            "ygo_scrape", "--race", "Dragon", "--race", "Sea Serpent",
            "-o", "out/cards.csv", "--attempts", "3", "--delay-ms", "0",
        ])
        .unwrap();
        let mut cfg = ScrapeConfig::default();
        params.apply(&mut cfg);

        assert_eq!(cfg.races, vec!["Dragon".to_string(), "Sea Serpent".to_string()]);
        assert_eq!(cfg.manifest_path, PathBuf::from("out/cards.csv"));
        assert_eq!(cfg.attempts, 3);
        assert_eq!(cfg.delay_ms, 0);
        assert_eq!(cfg.timeout_secs, 10);
    }

    #[test]
    fn no_flags_keeps_every_race() {
        let params = Params::try_parse_from(["ygo_scrape"]).unwrap();
        let mut cfg = ScrapeConfig::default();
        params.apply(&mut cfg);
        assert_eq!(cfg.races.len(), RACES.len());
    }
}
