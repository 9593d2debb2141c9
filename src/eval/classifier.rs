// src/eval/classifier.rs
//! Binary text classifiers over TF-IDF rows.
//!
//! `Recommended` is the positive class; every other label is negative.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::vectorizer::{SparseVec, dot};
use crate::review::Recommendation;

pub trait Classifier {
    fn name(&self) -> &'static str;
    fn fit(&mut self, x: &[SparseVec], y: &[Recommendation], n_features: usize);
    fn predict(&self, x: &SparseVec) -> Recommendation;
}

fn is_positive(label: Recommendation) -> bool {
    label == Recommendation::Recommended
}

fn label_of(positive: bool) -> Recommendation {
    if positive { Recommendation::Recommended } else { Recommendation::NotRecommended }
}

/* ---------------- Multinomial naive Bayes ---------------- */

#[derive(Clone, Debug)]
pub struct MultinomialNb {
    alpha: f64,
    /// log P(class), [negative, positive]
    log_prior: [f64; 2],
    /// log P(feature | class), one row per class
    log_prob: [Vec<f64>; 2],
}

impl Default for MultinomialNb {
    fn default() -> Self {
        Self { alpha: 1.0, log_prior: [f64::NEG_INFINITY; 2], log_prob: [Vec::new(), Vec::new()] }
    }
}

impl Classifier for MultinomialNb {
    fn name(&self) -> &'static str {
        "multinomial_nb"
    }

    fn fit(&mut self, x: &[SparseVec], y: &[Recommendation], n_features: usize) {
        let mut docs = [0usize; 2];
        let mut counts = [vec![0.0; n_features], vec![0.0; n_features]];
        for (row, &label) in x.iter().zip(y) {
            let c = is_positive(label) as usize;
            docs[c] += 1;
            for &(j, v) in row {
                counts[c][j] += v;
            }
        }

        let n = (docs[0] + docs[1]) as f64;
        for c in 0..2 {
            self.log_prior[c] = if docs[c] == 0 { f64::NEG_INFINITY } else { (docs[c] as f64 / n).ln() };
            let total: f64 = counts[c].iter().sum::<f64>() + self.alpha * n_features as f64;
            self.log_prob[c] = counts[c].iter().map(|&k| ((k + self.alpha) / total).ln()).collect();
        }
    }

    fn predict(&self, x: &SparseVec) -> Recommendation {
        let score = |c: usize| self.log_prior[c] + dot(x, &self.log_prob[c]);
        label_of(score(1) >= score(0))
    }
}

/* ---------------- SGD linear models ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Loss {
    Log,
    Hinge,
}

/// Linear model trained by shuffled SGD with L2 decay.
/// Weights are stored as `scale * v` so decay stays O(1) per step.
#[derive(Clone, Debug)]
struct SgdLinear {
    loss: Loss,
    epochs: usize,
    seed: u64,
    eta0: f64,
    lambda: f64,
    v: Vec<f64>,
    scale: f64,
    bias: f64,
}

impl SgdLinear {
    fn new(loss: Loss, epochs: usize, seed: u64) -> Self {
        Self { loss, epochs, seed, eta0: 0.5, lambda: 1e-4, v: Vec::new(), scale: 1.0, bias: 0.0 }
    }

    fn decision(&self, x: &SparseVec) -> f64 {
        self.scale * dot(x, &self.v) + self.bias
    }

    /// d loss / d margin-input for target `t` in {-1, 1}.
    fn gradient(&self, z: f64, t: f64) -> f64 {
        match self.loss {
            Loss::Log => -t / (1.0 + (t * z).exp()),
            Loss::Hinge => {
                if t * z < 1.0 { -t } else { 0.0 }
            }
        }
    }

    fn fit(&mut self, x: &[SparseVec], y: &[Recommendation], n_features: usize) {
        self.v = vec![0.0; n_features];
        self.scale = 1.0;
        self.bias = 0.0;

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut order: Vec<usize> = (0..x.len().min(y.len())).collect();
        let mut step = 0usize;

        for _ in 0..self.epochs {
            order.shuffle(&mut rng);
            for &i in &order {
                let eta = self.eta0 / (1.0 + self.eta0 * self.lambda * step as f64);
                step += 1;

                let t = if is_positive(y[i]) { 1.0 } else { -1.0 };
                let g = self.gradient(self.decision(&x[i]), t);

                self.scale *= 1.0 - eta * self.lambda;
                if g != 0.0 {
                    for &(j, val) in &x[i] {
                        self.v[j] -= eta * g * val / self.scale;
                    }
                    self.bias -= eta * g;
                }
                if self.scale < 1e-9 {
                    self.rescale();
                }
            }
        }
    }

    fn rescale(&mut self) {
        for w in &mut self.v {
            *w *= self.scale;
        }
        self.scale = 1.0;
    }
}

#[derive(Clone, Debug)]
pub struct LogisticRegression(SgdLinear);

impl LogisticRegression {
    pub fn new(epochs: usize, seed: u64) -> Self {
        Self(SgdLinear::new(Loss::Log, epochs, seed))
    }
}

impl Classifier for LogisticRegression {
    fn name(&self) -> &'static str {
        "logistic_regression"
    }

    fn fit(&mut self, x: &[SparseVec], y: &[Recommendation], n_features: usize) {
        self.0.fit(x, y, n_features);
    }

    fn predict(&self, x: &SparseVec) -> Recommendation {
        label_of(self.0.decision(x) >= 0.0)
    }
}

#[derive(Clone, Debug)]
pub struct LinearSvm(SgdLinear);

impl LinearSvm {
    pub fn new(epochs: usize, seed: u64) -> Self {
        Self(SgdLinear::new(Loss::Hinge, epochs, seed))
    }
}

impl Classifier for LinearSvm {
    fn name(&self) -> &'static str {
        "linear_svm"
    }

    fn fit(&mut self, x: &[SparseVec], y: &[Recommendation], n_features: usize) {
        self.0.fit(x, y, n_features);
    }

    fn predict(&self, x: &SparseVec) -> Recommendation {
        label_of(self.0.decision(x) >= 0.0)
    }
}
