// src/specs/mod.rs
//! # Page specs
//!
//! One module per remote page. A spec knows *where the data lives in the HTML*
//! and how to pull it out with the `core::html` helpers; nothing else.
//!
//! ## What does **not** live here
//! - Fetching (`core::net`), deduplication (`dedup`), persistence (`store`).
//! - Deciding which pages to visit; that belongs to `scrape`.
//!
//! ## Conventions
//! - Case-insensitive tag detection, scanning only inside known blocks.
//! - Missing sub-elements degrade to empty strings rather than errors, so one
//!   odd review never costs the rest of the page.
//! - Specs are testable offline against saved HTML.
pub mod reviews;
