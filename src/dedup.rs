// src/dedup.rs
//! Exact-content deduplication of one scraped batch.
//!
//! Two reviews are duplicates when label, text and author are all equal.
//! The first occurrence wins and keeps its position.

use std::collections::HashSet;

use crate::review::{NewReview, Recommendation};

/// Indices (ascending) of every record that repeats an earlier one.
pub fn duplicate_indices(records: &[NewReview]) -> Vec<usize> {
    let mut seen: HashSet<(Recommendation, &str, &str)> = HashSet::with_capacity(records.len());
    let mut dupes = Vec::new();

    for (i, r) in records.iter().enumerate() {
        if !seen.insert((r.label, r.text.as_str(), r.author.as_str())) {
            dupes.push(i);
        }
    }
    dupes
}

/// Remove content-duplicates in place, preserving the order of first occurrences.
pub fn deduplicate(mut records: Vec<NewReview>) -> Vec<NewReview> {
    let dupes = duplicate_indices(&records);
    if !dupes.is_empty() {
        tracing::debug!("dedup: dropping {} of {} records", dupes.len(), records.len());
    }
    // Highest index first so earlier removals don't shift later ones.
    for &i in dupes.iter().rev() {
        records.remove(i);
    }
    records
}
