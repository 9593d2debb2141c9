// src/eval/mod.rs
//! Learning-curve evaluation: for growing training sizes, fit every
//! classifier on a balanced sample and score it on the held-out rows.

pub mod classifier;
pub mod vectorizer;

pub use classifier::{Classifier, LinearSvm, LogisticRegression, MultinomialNb};
pub use vectorizer::{SparseVec, TfidfVectorizer};

use tracing::{info, warn};

use crate::config::EvalOptions;
use crate::error::Result;
use crate::progress::Progress;
use crate::review::Recommendation;
use crate::sampling;
use crate::store::ReviewStore;

/// Accuracies of one training size, in classifier order.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalRow {
    pub train_size: usize,
    pub test_size: usize,
    /// Rows actually available on each side after sampling.
    pub train_rows: usize,
    pub test_rows: usize,
    pub scores: Vec<(&'static str, f64)>,
}

impl EvalRow {
    /// `"83.0, 85.2, 86.1"`.
    pub fn score_line(&self) -> String {
        self.scores.iter().map(|(_, s)| format!("{s:.1}")).collect::<Vec<_>>().join(", ")
    }
}

/// The classifiers every round evaluates.
pub fn default_classifiers(opts: &EvalOptions) -> Vec<Box<dyn Classifier>> {
    vec![
        Box::new(MultinomialNb::default()),
        Box::new(LogisticRegression::new(opts.epochs, opts.seed)),
        Box::new(LinearSvm::new(opts.epochs, opts.seed)),
    ]
}

/// Percent of `vectors` predicted as their label. 0 when there are none.
pub fn accuracy(clf: &dyn Classifier, vectors: &[SparseVec], labels: &[Recommendation]) -> f64 {
    let n = vectors.len().min(labels.len());
    if n == 0 {
        return 0.0;
    }
    let correct = vectors.iter().zip(labels).filter(|(x, y)| clf.predict(x) == **y).count();
    correct as f64 / n as f64 * 100.0
}

pub fn evaluate<S: ReviewStore + ?Sized>(
    store: &S,
    opts: &EvalOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<EvalRow>> {
    let sizes = opts.training_sizes();
    if let Some(p) = progress.as_deref_mut() {
        p.begin(Some(sizes.len()));
    }

    let mut rows = Vec::with_capacity(sizes.len());
    for train_size in sizes {
        let prepared = sampling::prepare(store, train_size + opts.test_size, opts.test_size)?;
        if prepared.training_documents.is_empty() {
            warn!("eval: no training rows for size {train_size}");
        }

        let mut vectorizer = TfidfVectorizer::new();
        let x_train = vectorizer.fit_transform(&prepared.training_documents);
        let x_test = vectorizer.transform(&prepared.testing_documents);

        let mut scores = Vec::new();
        for mut clf in default_classifiers(opts) {
            clf.fit(&x_train, &prepared.training_labels, vectorizer.n_features());
            scores.push((clf.name(), accuracy(clf.as_ref(), &x_test, &prepared.testing_labels)));
        }

        let row = EvalRow {
            train_size,
            test_size: opts.test_size,
            train_rows: x_train.len(),
            test_rows: x_test.len(),
            scores,
        };
        info!("eval: {}", row.score_line());
        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!("train {train_size}: {}", row.score_line()));
        }
        rows.push(row);
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(rows)
}
