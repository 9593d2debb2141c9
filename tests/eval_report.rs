// tests/eval_report.rs
use std::fs;

use review_scrape::config::EvalOptions;
use review_scrape::eval::{self, EvalRow};
use review_scrape::report;
use review_scrape::review::{NewReview, Provenance, Recommendation};
use review_scrape::store::{ReviewStore, SqliteStore};

const GOOD: [&str; 4] = ["great", "fun", "loved", "excellent"];
const BAD: [&str; 4] = ["boring", "broken", "hated", "awful"];

fn separable_store(per_label: usize) -> SqliteStore {
    let mut store = SqliteStore::open_in_memory().unwrap();
    for i in 0..per_label {
        let prov = Provenance {
            url: format!("http://store.test/app/{i}/"),
            item_number: i as u32,
            scraped_at: "2024-05-01 12:00:00.000000".into(),
            classified: 0,
        };
        let good = format!("{} and {} game number{i}", GOOD[i % 4], GOOD[(i + 1) % 4]);
        let bad = format!("{} and {} game number{i}", BAD[i % 4], BAD[(i + 1) % 4]);
        store.insert(&NewReview::new(Recommendation::Recommended, good, format!("g{i}")), &prov).unwrap();
        store.insert(&NewReview::new(Recommendation::NotRecommended, bad, format!("b{i}")), &prov).unwrap();
    }
    store
}

fn options() -> EvalOptions {
    EvalOptions { test_size: 10, end_interval: 40, epochs: 15, seed: 3 }
}

#[test]
fn one_row_per_training_size() {
    let store = separable_store(40);
    let rows = eval::evaluate(&store, &options(), None).unwrap();

    assert_eq!(rows.iter().map(|r| r.train_size).collect::<Vec<_>>(), [10, 20, 30]);
    for row in &rows {
        assert_eq!(row.test_size, 10);
        assert_eq!(row.test_rows, 10);
        assert_eq!(row.train_rows, row.train_size);
        assert_eq!(row.scores.len(), 3);
    }
}

#[test]
fn separable_reviews_are_classified_perfectly() {
    let store = separable_store(40);
    let rows = eval::evaluate(&store, &options(), None).unwrap();
    let last = rows.last().unwrap();
    for (name, acc) in &last.scores {
        assert_eq!(*acc, 100.0, "{name}");
    }
}

#[test]
fn empty_store_yields_zero_scores_not_errors() {
    let store = SqliteStore::open_in_memory().unwrap();
    let rows = eval::evaluate(&store, &options(), None).unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.train_rows == 0 && r.scores.iter().all(|&(_, s)| s == 0.0)));
}

#[test]
fn report_has_header_and_one_line_per_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("accuracy.csv");
    let rows = vec![
        EvalRow {
            train_size: 500,
            test_size: 500,
            train_rows: 500,
            test_rows: 500,
            scores: vec![("multinomial_nb", 81.04), ("linear_svm", 84.66)],
        },
        EvalRow {
            train_size: 1000,
            test_size: 500,
            train_rows: 1000,
            test_rows: 500,
            scores: vec![("multinomial_nb", 82.0), ("linear_svm", 86.2)],
        },
    ];

    report::write_eval_report(&path, &rows).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "train_size,test_size,multinomial_nb,linear_svm\n500,500,81.0,84.7\n1000,500,82.0,86.2\n"
    );
}

#[test]
fn report_rejects_ragged_rows() {
    let dir = tempfile::tempdir().unwrap();
    let rows = vec![
        EvalRow { train_size: 1, test_size: 1, train_rows: 1, test_rows: 1, scores: vec![("a", 1.0)] },
        EvalRow { train_size: 2, test_size: 1, train_rows: 2, test_rows: 1, scores: vec![] },
    ];
    assert!(report::write_eval_report(&dir.path().join("r.csv"), &rows).is_err());
}
