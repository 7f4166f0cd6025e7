// src/config/options.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use super::consts::*;
use crate::error::{Result, ScrapeError};

/// Everything a corpus build can be tuned with.
///
/// Sources, lowest to highest priority: built-in defaults,
/// `.store/config.toml`, `YGO_SCRAPE_*` environment variables.
/// CLI flags are applied on top by the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub api_base: String,
    pub user_agent: String,
    pub images_dir: PathBuf,
    pub manifest_path: PathBuf,
    pub attempts: u32,
    pub delay_ms: u64,
    pub timeout_secs: u64,
    pub races: Vec<String>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            api_base: API_BASE.into(),
            user_agent: USER_AGENT.into(),
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
            manifest_path: PathBuf::from(DEFAULT_MANIFEST),
            attempts: ATTEMPTS,
            delay_ms: REQUEST_PAUSE_MS,
            timeout_secs: TIMEOUT_SECS,
            races: RACES.iter().map(|r| r.to_string()).collect(),
        }
    }
}

impl ScrapeConfig {
    /// Load from the default store location plus environment.
    pub fn load() -> Result<Self> {
        Self::load_from(&Path::new(STORE_DIR).join(CONFIG_FILE))
    }

    /// Load with an explicit TOML file in place of `.store/config.toml`.
    /// A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let cfg: Self = Self::figment(path).extract()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn figment(path: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if path.exists() {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn validate(&self) -> Result<()> {
        if self.attempts == 0 {
            return Err(ScrapeError::Config("attempts must be at least 1".into()));
        }
        if self.timeout_secs == 0 {
            return Err(ScrapeError::Config("timeout_secs must be at least 1".into()));
        }
        Ok(())
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
