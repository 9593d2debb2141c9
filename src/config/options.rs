// src/config/options.rs
//! Runtime options. Every field has a default from `consts`, so an empty (or
//! partial) TOML file is valid.
//!
//! ```toml
//! [scrape]
//! start_item = 300000
//! step = 5
//! pause_ms = 1000
//!
//! [eval]
//! test_size = 500
//! end_interval = 4500
//!
//! [store]
//! db_path = "database_steam_reviews.db"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::consts::*;
use crate::error::Result;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub eval: EvalOptions,
    pub store: StoreOptions,
}

impl AppOptions {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScrapeOptions {
    pub base_url: String,
    /// First item number used when the table is empty.
    pub start_item: u32,
    /// Item numbers advance by this much per page.
    pub step: u32,
    pub pause_ms: u64,
    pub http_timeout_secs: u64,
    /// Stop after this many pages; `None` runs until interrupted.
    pub max_pages: Option<usize>,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            start_item: START_ITEM,
            step: ITEM_STEP,
            pause_ms: REQUEST_PAUSE_MS,
            http_timeout_secs: HTTP_TIMEOUT_SECS,
            max_pages: None,
        }
    }
}

impl ScrapeOptions {
    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EvalOptions {
    /// Held-out rows per round (split evenly between labels).
    pub test_size: usize,
    /// Training sizes run from `test_size` up to, not including, this.
    pub end_interval: usize,
    pub epochs: usize,
    pub seed: u64,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            test_size: TEST_SIZE,
            end_interval: END_INTERVAL,
            epochs: SGD_EPOCHS,
            seed: SGD_SEED,
        }
    }
}

impl EvalOptions {
    /// Training sizes evaluated, in order.
    pub fn training_sizes(&self) -> Vec<usize> {
        if self.test_size == 0 {
            return Vec::new();
        }
        (self.test_size..self.end_interval).step_by(self.test_size).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    pub db_path: PathBuf,
    pub busy_timeout_secs: u64,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE),
            busy_timeout_secs: DB_BUSY_TIMEOUT_SECS,
        }
    }
}

impl StoreOptions {
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_secs(self.busy_timeout_secs)
    }
}
