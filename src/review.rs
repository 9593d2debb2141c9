// src/review.rs
//! Review records as they move through the pipeline.
//!
//! - `NewReview`: what one page yields (label, text, author). No id yet.
//! - `Review`: a persisted row. Storage assigns `id` on insert.
//! - `Provenance`: where/when a `NewReview` came from; attached at insert time.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Recommendation label shown next to a review.
///
/// `Undetected` is the scraper's placeholder when the thumb image could not be
/// classified. It is stored like any other label but never sampled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Recommendation {
    Recommended,
    NotRecommended,
    Undetected,
}

impl Recommendation {
    /// The two labels the balanced sampler draws from, in sampling order.
    pub const BALANCED: [Recommendation; 2] =
        [Recommendation::Recommended, Recommendation::NotRecommended];

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Recommended => "Recommended",
            Recommendation::NotRecommended => "Not Recommended",
            Recommendation::Undetected => "Issue detecting recommendation",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Recommendation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Recommended" => Ok(Recommendation::Recommended),
            "Not Recommended" => Ok(Recommendation::NotRecommended),
            "Issue detecting recommendation" => Ok(Recommendation::Undetected),
            other => Err(Error::InvalidLabel(other.to_string())),
        }
    }
}

/// One review as parsed from a page, before persistence.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NewReview {
    pub label: Recommendation,
    pub text: String,
    pub author: String,
}

impl NewReview {
    pub fn new(label: Recommendation, text: impl Into<String>, author: impl Into<String>) -> Self {
        Self { label, text: text.into(), author: author.into() }
    }
}

/// Where a batch was scraped from. Shared by every review of one page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Provenance {
    pub url: String,
    pub item_number: u32,
    pub scraped_at: String,
    /// 0 = never used in a training/testing pass, 1 = used.
    pub classified: i64,
}

/// A persisted review row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Review {
    pub id: i64,
    pub url: String,
    pub item_number: u32,
    pub scraped_at: String,
    pub classified: i64,
    pub label: Recommendation,
    pub text: String,
    pub author: String,
}
