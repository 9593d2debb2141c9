// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "http://store.steampowered.com/app/";
pub const USER_AGENT: &str = concat!("review_scrape/", env!("CARGO_PKG_VERSION"));
pub const HTTP_TIMEOUT_SECS: u64 = 15;

// Local store
pub const STORE_DIR: &str = ".store";
pub const DEBUG_LOG_FILE: &str = "debug.log";
pub const DEFAULT_DB_FILE: &str = "database_steam_reviews.db";
pub const DB_BUSY_TIMEOUT_SECS: u64 = 20;

// Scrape
pub const START_ITEM: u32 = 300_000;
pub const ITEM_STEP: u32 = 5;
pub const REQUEST_PAUSE_MS: u64 = 1_000; // be polite

// Eval
pub const TEST_SIZE: usize = 500;
pub const END_INTERVAL: usize = 4_500;
pub const SGD_EPOCHS: usize = 20;
pub const SGD_SEED: u64 = 42;
