// src/sampling.rs
//! Balanced sampling and train/test partitioning.
//!
//! ```text
//! store ─ retrieve_balanced ─► BalancedSample ─ partition ─► Partition
//!                                                     │
//!                               Prepared ◄─ project_columns
//! ```
//!
//! Degenerate inputs (odd sizes, too few rows of a label) never fail: slices
//! shrink and `prepare` reports what happened as `Degeneracy` notices.

use tracing::{debug, warn};

use crate::error::Result;
use crate::review::{Recommendation, Review};
use crate::store::ReviewStore;

/// Status flag of rows not yet used in any pass.
const UNCLASSIFIED: i64 = 0;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BalancedSample {
    pub recommended: Vec<Review>,
    pub not_recommended: Vec<Review>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Partition {
    pub training: Vec<Review>,
    pub testing: Vec<Review>,
}

/// Label and document columns of one partition side, index-aligned.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Projection {
    pub labels: Vec<Recommendation>,
    pub documents: Vec<String>,
}

impl Projection {
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Degeneracy {
    /// `total_count` was odd; one row of budget was dropped.
    OddTotal(usize),
    /// `test_size` was odd; the test set holds one row fewer.
    OddTestSize(usize),
    /// Storage held fewer rows of `label` than requested.
    Shortfall { label: Recommendation, requested: usize, returned: usize },
    /// Final training or testing side has unequal label counts.
    Imbalanced { side: Side, recommended: usize, not_recommended: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Training,
    Testing,
}

/// Output of `prepare`: what the evaluation loop consumes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Prepared {
    pub training_documents: Vec<String>,
    pub testing_documents: Vec<String>,
    pub training_labels: Vec<Recommendation>,
    pub testing_labels: Vec<Recommendation>,
    pub degeneracies: Vec<Degeneracy>,
}

impl Prepared {
    pub fn is_degenerate(&self) -> bool {
        !self.degeneracies.is_empty()
    }
}

/// Fetch `total_count / 2` unclassified rows of each label, in storage order.
pub fn retrieve_balanced<S: ReviewStore + ?Sized>(store: &S, total_count: usize) -> Result<BalancedSample> {
    let half = total_count / 2;
    let recommended = store.retrieve_by_label(Recommendation::Recommended, UNCLASSIFIED, half)?;
    let not_recommended = store.retrieve_by_label(Recommendation::NotRecommended, UNCLASSIFIED, half)?;
    debug!(
        "sampling: requested {half} per label, got {} / {}",
        recommended.len(),
        not_recommended.len()
    );
    Ok(BalancedSample { recommended, not_recommended })
}

/// Split each label pool at `test_size / 2`: heads become testing, tails training.
/// Recommended rows precede not-recommended rows on both sides.
pub fn partition(recommended: &[Review], not_recommended: &[Review], test_size: usize) -> Partition {
    let split = test_size / 2;
    let (rec_test, rec_train) = recommended.split_at(split.min(recommended.len()));
    let (not_test, not_train) = not_recommended.split_at(split.min(not_recommended.len()));

    Partition {
        training: rec_train.iter().chain(not_train).cloned().collect(),
        testing: rec_test.iter().chain(not_test).cloned().collect(),
    }
}

/// Pull (label, text) out of both sides, keeping positions aligned.
pub fn project_columns(training: &[Review], testing: &[Review]) -> (Projection, Projection) {
    (project(training), project(testing))
}

fn project(rows: &[Review]) -> Projection {
    let (labels, documents): (Vec<_>, Vec<_>) = rows.iter().map(|r| (r.label, r.text.clone())).unzip();
    Projection { labels, documents }
}

/// retrieve_balanced → partition → project_columns.
pub fn prepare<S: ReviewStore + ?Sized>(store: &S, total_count: usize, test_size: usize) -> Result<Prepared> {
    let sample = retrieve_balanced(store, total_count)?;
    let parts = partition(&sample.recommended, &sample.not_recommended, test_size);
    let (train, test) = project_columns(&parts.training, &parts.testing);

    let degeneracies = inspect(total_count, test_size, &sample, &parts);
    for d in &degeneracies {
        warn!("sampling: {d:?}");
    }

    Ok(Prepared {
        training_documents: train.documents,
        testing_documents: test.documents,
        training_labels: train.labels,
        testing_labels: test.labels,
        degeneracies,
    })
}

fn inspect(total_count: usize, test_size: usize, sample: &BalancedSample, parts: &Partition) -> Vec<Degeneracy> {
    let mut out = Vec::new();
    if total_count % 2 == 1 {
        out.push(Degeneracy::OddTotal(total_count));
    }
    if test_size % 2 == 1 {
        out.push(Degeneracy::OddTestSize(test_size));
    }

    let half = total_count / 2;
    for (label, pool) in Recommendation::BALANCED.into_iter().zip([&sample.recommended, &sample.not_recommended]) {
        if pool.len() < half {
            out.push(Degeneracy::Shortfall { label, requested: half, returned: pool.len() });
        }
    }

    for (side, rows) in [(Side::Training, &parts.training), (Side::Testing, &parts.testing)] {
        let recommended = rows.iter().filter(|r| r.label == Recommendation::Recommended).count();
        let not_recommended = rows.len() - recommended;
        if recommended != not_recommended {
            out.push(Degeneracy::Imbalanced { side, recommended, not_recommended });
        }
    }
    out
}
