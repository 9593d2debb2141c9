// src/scrape.rs
//! The sequential scrape loop: fetch page → extract → deduplicate → insert → sleep.
//!
//! Resumes from the item number of the last stored row. Runs until
//! `ScrapeOptions::max_pages` pages were visited, or forever when unset.

use std::thread;

use chrono::Local;
use tracing::{info, warn};

use crate::config::ScrapeOptions;
use crate::core::Fetch;
use crate::dedup;
use crate::error::Result;
use crate::progress::Progress;
use crate::review::{NewReview, Provenance};
use crate::specs::reviews;
use crate::store::ReviewStore;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub pages: usize,
    pub pages_with_reviews: usize,
    pub fetch_failures: usize,
    /// Reviews extracted before deduplication.
    pub found: usize,
    pub duplicates: usize,
    pub inserted: usize,
    pub last_item: u32,
}

/// Item number the loop continues from (it advances before the first fetch).
pub fn starting_item<S: ReviewStore + ?Sized>(store: &S, opts: &ScrapeOptions) -> Result<u32> {
    Ok(match store.retrieve_last()? {
        Some(last) => last.item_number,
        None => opts.start_item,
    })
}

/// Deduplicated reviews of one fetched page and how many repeats were dropped.
/// `None` when the page has no review section.
pub fn extract_batch(doc: &str) -> Option<(Vec<NewReview>, usize)> {
    if !reviews::page_has_reviews(doc) {
        return None;
    }
    let found = reviews::reviews_on_page(doc);
    let total = found.len();
    let batch = dedup::deduplicate(found);
    let dupes = total - batch.len();
    Some((batch, dupes))
}

pub fn run<S, F>(
    store: &mut S,
    fetcher: &mut F,
    opts: &ScrapeOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<ScrapeSummary>
where
    S: ReviewStore + ?Sized,
    F: Fetch + ?Sized,
{
    let mut item = starting_item(store, opts)?;
    let mut summary = ScrapeSummary { last_item: item, ..Default::default() };
    info!("scrape: resuming after item {item}");

    if let Some(p) = progress.as_deref_mut() {
        p.begin(opts.max_pages);
    }

    while opts.max_pages.is_none_or(|max| summary.pages < max) {
        thread::sleep(opts.pause());

        item = item.saturating_add(opts.step);
        summary.pages += 1;
        summary.last_item = item;
        let url = reviews::app_url(&opts.base_url, item);

        let doc = match fetcher.fetch(&url) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("scrape: {url}: {e}");
                summary.fetch_failures += 1;
                if let Some(p) = progress.as_deref_mut() {
                    p.log(&format!("Fetch failed for app number {item}: {e}"));
                }
                continue;
            }
        };
        let scraped_at = Local::now().format("%Y-%m-%d %H:%M:%S%.6f").to_string();

        let (batch, line) = match extract_batch(&doc) {
            Some((batch, dupes)) => {
                summary.pages_with_reviews += 1;
                summary.duplicates += dupes;
                summary.found += batch.len() + dupes;
                let line = format!("Found {} reviews for app number {item}", batch.len() + dupes);
                (batch, line)
            }
            None => (Vec::new(), format!("No review element found for number {item}")),
        };
        info!("scrape: {line}");
        if let Some(p) = progress.as_deref_mut() {
            p.log(&line);
        }

        let from = Provenance { url, item_number: item, scraped_at, classified: 0 };
        for review in &batch {
            store.insert(review, &from)?;
        }
        summary.inserted += batch.len();

        if let Some(p) = progress.as_deref_mut() {
            p.item_done(item, batch.len());
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    info!(
        "scrape: {} pages, {} inserted, {} duplicates dropped, {} fetch failures",
        summary.pages, summary.inserted, summary.duplicates, summary.fetch_failures
    );
    Ok(summary)
}
