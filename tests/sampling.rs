// tests/sampling.rs
use review_scrape::review::{NewReview, Provenance, Recommendation};
use review_scrape::sampling::{self, Degeneracy, Side};
use review_scrape::store::{ReviewStore, SqliteStore};

use Recommendation::*;

fn prov(n: u32) -> Provenance {
    Provenance {
        url: format!("http://store.test/app/{n}/"),
        item_number: n,
        scraped_at: "2011-01-01 00:00:00.000000".into(),
        classified: 0,
    }
}

/// `rec` recommended and `not` not-recommended rows, interleaved by id.
fn seed(store: &mut SqliteStore, rec: usize, not: usize) {
    let mut i = 0u32;
    for k in 0..rec.max(not) {
        if k < rec {
            store.insert(&NewReview::new(Recommended, format!("good {k}"), format!("r{k}")), &prov(i)).unwrap();
            i += 1;
        }
        if k < not {
            store.insert(&NewReview::new(NotRecommended, format!("bad {k}"), format!("n{k}")), &prov(i)).unwrap();
            i += 1;
        }
    }
}

#[test]
fn prepare_twelve_with_four_held_out() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    seed(&mut store, 6, 6);

    let p = sampling::prepare(&store, 12, 4).unwrap();
    assert_eq!(p.training_documents.len(), 8);
    assert_eq!(p.testing_documents.len(), 4);
    assert_eq!(p.training_labels.len(), 8);
    assert_eq!(p.testing_labels.len(), 4);
    assert!(!p.is_degenerate());

    // Recommended block first on both sides.
    assert_eq!(p.testing_labels, [Recommended, Recommended, NotRecommended, NotRecommended]);
    assert_eq!(p.testing_documents, ["good 0", "good 1", "bad 0", "bad 1"]);
    assert_eq!(p.training_documents[..4], ["good 2", "good 3", "good 4", "good 5"]);
}

#[test]
fn retrieve_balanced_takes_lowest_ids_per_label() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    seed(&mut store, 5, 5);

    let s = sampling::retrieve_balanced(&store, 4).unwrap();
    assert_eq!(s.recommended.len(), 2);
    assert_eq!(s.not_recommended.len(), 2);
    assert!(s.recommended.iter().all(|r| r.label == Recommended));
    assert!(s.not_recommended.iter().all(|r| r.label == NotRecommended));
    assert!(s.recommended[0].id < s.recommended[1].id);
    assert!(s.not_recommended[0].id < s.not_recommended[1].id);
    assert_eq!(s.recommended[0].text, "good 0");
    assert_eq!(s.not_recommended[1].text, "bad 1");
}

#[test]
fn odd_total_requests_floor_half() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    seed(&mut store, 5, 5);

    let s = sampling::retrieve_balanced(&store, 7).unwrap();
    assert_eq!((s.recommended.len(), s.not_recommended.len()), (3, 3));
}

#[test]
fn shortfall_is_reported_not_raised() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    seed(&mut store, 6, 2);

    let p = sampling::prepare(&store, 12, 4).unwrap();
    assert_eq!(p.testing_labels, [Recommended, Recommended, NotRecommended, NotRecommended]);
    assert_eq!(p.training_labels, [Recommended; 4]);
    assert!(p.degeneracies.contains(&Degeneracy::Shortfall {
        label: NotRecommended,
        requested: 6,
        returned: 2
    }));
    assert!(p.degeneracies.contains(&Degeneracy::Imbalanced {
        side: Side::Training,
        recommended: 4,
        not_recommended: 0
    }));
}

#[test]
fn undetected_and_classified_rows_are_never_sampled() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store.insert(&NewReview::new(Undetected, "meh", "u"), &prov(1)).unwrap();
    let used = store.insert(&NewReview::new(Recommended, "seen", "a"), &prov(2)).unwrap();
    store.insert(&NewReview::new(Recommended, "fresh", "b"), &prov(3)).unwrap();
    store.insert(&NewReview::new(NotRecommended, "nope", "c"), &prov(4)).unwrap();
    store.mark_classified(&[used]).unwrap();

    let s = sampling::retrieve_balanced(&store, 10).unwrap();
    let texts: Vec<_> = s.recommended.iter().chain(&s.not_recommended).map(|r| r.text.as_str()).collect();
    assert_eq!(texts, ["fresh", "nope"]);
}

#[test]
fn empty_store_prepares_empty_sides() {
    let store = SqliteStore::open_in_memory().unwrap();
    let p = sampling::prepare(&store, 8, 4).unwrap();
    assert!(p.training_documents.is_empty());
    assert!(p.testing_documents.is_empty());
    assert_eq!(p.degeneracies.len(), 2);
}
