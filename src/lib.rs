// src/lib.rs

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod specs;

pub mod dedup;
pub mod error;
pub mod eval;
pub mod log;
pub mod progress;
pub mod report;
pub mod review;
pub mod sampling;
pub mod scrape;
pub mod store;

pub use error::{Error, Result};
