// src/specs/reviews.rs
//! Scraping spec for an app page's review section.
//!
//! Layout relied on:
//! ```text
//! <div class="user_reviews_header">…</div>          page has reviews
//! <div class="review_box">
//!   <div class="thumb"><img src="…/icon_thumbsUp.png"></div>
//!   <div class="persona_name"><a href="…">Author</a></div>
//!   <div class="content">Review text<br>…</div>
//! </div>
//! ```

use crate::core::html::{elements_ci, first_element_ci, first_text};
use crate::review::{NewReview, Recommendation};

/// `"{base}{item}/"`.
pub fn app_url(base_url: &str, item_number: u32) -> String {
    format!("{base_url}{item_number}/")
}

pub fn page_has_reviews(doc: &str) -> bool {
    first_element_ci(doc, "div", "user_reviews_header").is_some()
}

/// Classify the thumb markup by the icon it loads.
pub fn recommendation_from_thumb(fragment: &str) -> Recommendation {
    if fragment.contains("thumbsUp") {
        Recommendation::Recommended
    } else if fragment.contains("thumbsDown") {
        Recommendation::NotRecommended
    } else {
        Recommendation::Undetected
    }
}

/// Every review box on the page, in document order. Not deduplicated.
pub fn reviews_on_page(doc: &str) -> Vec<NewReview> {
    elements_ci(doc, "div", "review_box")
        .into_iter()
        .map(parse_review_box)
        .collect()
}

fn parse_review_box(block: &str) -> NewReview {
    let thumb = first_element_ci(block, "div", "thumb").unwrap_or("");
    let text = first_element_ci(block, "div", "content").map(first_text).unwrap_or_default();
    let author = first_element_ci(block, "div", "persona_name").map(first_text).unwrap_or_default();

    NewReview { label: recommendation_from_thumb(thumb), text, author }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_item_urls() {
        assert_eq!(app_url("http://store.steampowered.com/app/", 300005), "http://store.steampowered.com/app/300005/");
    }

    #[test]
    fn thumb_icons_map_to_labels() {
        assert_eq!(
            recommendation_from_thumb(r#"<div class="thumb"><img src="/icon_thumbsUp.png"></div>"#),
            Recommendation::Recommended
        );
        assert_eq!(
            recommendation_from_thumb(r#"<img src="/icon_thumbsDown_v6.png">"#),
            Recommendation::NotRecommended
        );
        assert_eq!(recommendation_from_thumb(""), Recommendation::Undetected);
    }

    #[test]
    fn page_without_header_has_no_reviews() {
        assert!(!page_has_reviews("<html><body><div class=\"game_area\"></div></body></html>"));
        assert!(page_has_reviews("<div class=\"user_reviews_header\">Reviews</div>"));
    }

    #[test]
    fn review_box_missing_parts_degrades_to_empty() {
        let doc = r#"<div class="review_box"><div class="thumb"></div></div>"#;
        let got = reviews_on_page(doc);
        assert_eq!(got, vec![NewReview::new(Recommendation::Undetected, "", "")]);
    }
}
