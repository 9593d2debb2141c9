// src/core/sanitize.rs

/// Decode the handful of entities review markup actually uses.
/// `&amp;` goes last so `&amp;lt;` stays `&lt;`.
pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Entity-decoded, trimmed text node.
pub fn clean_text(s: &str) -> String {
    normalize_entities(s).trim().to_string()
}
