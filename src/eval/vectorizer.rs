// src/eval/vectorizer.rs
//! TF-IDF document vectors.
//!
//! Tokens are lowercase alphanumeric runs of at least two characters.
//! idf is smoothed, `ln((1 + n) / (1 + df)) + 1`, and rows are L2-normalized.

use std::collections::{BTreeSet, HashMap};

/// Sparse row: `(feature index, weight)` sorted by index.
pub type SparseVec = Vec<(usize, f64)>;

pub fn dot(x: &SparseVec, dense: &[f64]) -> f64 {
    x.iter().map(|&(j, v)| v * dense.get(j).copied().unwrap_or(0.0)).sum()
}

fn tokenize(doc: &str) -> impl Iterator<Item = String> + '_ {
    doc.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 2)
        .map(str::to_lowercase)
}

#[derive(Clone, Debug, Default)]
pub struct TfidfVectorizer {
    vocab: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    pub fn fit(&mut self, docs: &[String]) {
        let tokenized: Vec<BTreeSet<String>> = docs.iter().map(|d| tokenize(d).collect()).collect();

        // Sorted vocabulary keeps feature indices stable across runs.
        let terms: BTreeSet<&String> = tokenized.iter().flatten().collect();
        self.vocab = terms.into_iter().enumerate().map(|(i, t)| (t.clone(), i)).collect();

        let mut df = vec![0usize; self.vocab.len()];
        for doc_terms in &tokenized {
            for t in doc_terms {
                df[self.vocab[t]] += 1;
            }
        }
        let n = docs.len() as f64;
        self.idf = df.iter().map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0).collect();
    }

    pub fn transform(&self, docs: &[String]) -> Vec<SparseVec> {
        docs.iter().map(|d| self.transform_one(d)).collect()
    }

    pub fn fit_transform(&mut self, docs: &[String]) -> Vec<SparseVec> {
        self.fit(docs);
        self.transform(docs)
    }

    fn transform_one(&self, doc: &str) -> SparseVec {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for tok in tokenize(doc) {
            // Unseen terms carry no weight.
            if let Some(&j) = self.vocab.get(&tok) {
                *counts.entry(j).or_insert(0.0) += 1.0;
            }
        }
        let mut row: SparseVec = counts.into_iter().map(|(j, tf)| (j, tf * self.idf[j])).collect();
        row.sort_unstable_by_key(|&(j, _)| j);

        let norm = row.iter().map(|&(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, v) in &mut row {
                *v /= norm;
            }
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn vocabulary_ignores_case_punctuation_and_short_tokens() {
        let mut v = TfidfVectorizer::new();
        v.fit(&docs(&["It was GREAT!", "it was bad, a mess"]));
        // a → dropped (single char); it, was, great, bad, mess
        assert_eq!(v.n_features(), 5);
    }

    #[test]
    fn rows_are_unit_length_and_sorted() {
        let mut v = TfidfVectorizer::new();
        let rows = v.fit_transform(&docs(&["good good game", "bad game"]));
        for row in &rows {
            let norm: f64 = row.iter().map(|&(_, x)| x * x).sum();
            assert!((norm - 1.0).abs() < 1e-9);
            assert!(row.windows(2).all(|w| w[0].0 < w[1].0));
        }
    }

    #[test]
    fn shared_terms_weigh_less_than_rare_ones() {
        let mut v = TfidfVectorizer::new();
        let rows = v.fit_transform(&docs(&["game fun", "game dull"]));
        let game = v.vocab["game"];
        let fun = v.vocab["fun"];
        let w = |j: usize| rows[0].iter().find(|&&(i, _)| i == j).map(|&(_, x)| x).unwrap();
        assert!(w(game) < w(fun));
    }

    #[test]
    fn unseen_words_vectorize_to_empty() {
        let mut v = TfidfVectorizer::new();
        v.fit(&docs(&["known words"]));
        assert!(v.transform(&docs(&["totally novel"]))[0].is_empty());
    }
}
