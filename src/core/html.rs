// src/core/html.rs
//! Tolerant, case-insensitive tag scanning. No DOM.
//!
//! All offsets are byte offsets into the original document. Lowercasing is
//! ASCII-only, so offsets into the lowercased copy line up with the original.

use super::sanitize::clean_text;

/// `(start, open_end)` of the next `<tag ...>` opener at or after `from`.
/// `lc` must already be ASCII-lowercased; `tag` lowercase.
fn find_open_tag(lc: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let pat = format!("<{tag}");
    let mut at = from;
    loop {
        let start = lc.get(at..)?.find(&pat)? + at;
        let after = start + pat.len();
        match lc.as_bytes().get(after) {
            // `<div>` / `<div class=..>` / `<div/>`, but not `<divider>`
            Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => {
                let end = lc[after..].find('>')? + after + 1;
                return Some((start, end));
            }
            Some(_) => at = after,
            None => return None,
        }
    }
}

/// End offset (past `>`) of the close tag balancing an opener that ended at `from`.
fn matching_close(lc: &str, tag: &str, from: usize) -> Option<usize> {
    let close = format!("</{tag}");
    let mut depth = 1usize;
    let mut at = from;
    loop {
        let next_close = lc.get(at..)?.find(&close)? + at;
        match find_open_tag(lc, tag, at) {
            Some((open, open_end)) if open < next_close => {
                depth += 1;
                at = open_end;
            }
            _ => {
                let end = lc[next_close..].find('>')? + next_close + 1;
                depth -= 1;
                if depth == 0 {
                    return Some(end);
                }
                at = end;
            }
        }
    }
}

/// Raw value of the `class` attribute in an opening tag, if present.
pub fn class_attr(open_tag: &str) -> Option<&str> {
    let lc = open_tag.to_ascii_lowercase();
    let bytes = lc.as_bytes();
    let mut from = 0;

    while let Some(rel) = lc[from..].find("class") {
        let i = from + rel;
        from = i + "class".len();

        let boundary = i > 0 && bytes[i - 1].is_ascii_whitespace();
        let mut j = from;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() { j += 1; }
        if !boundary || bytes.get(j) != Some(&b'=') {
            continue;
        }
        j += 1;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() { j += 1; }

        return match bytes.get(j) {
            Some(&q @ (b'"' | b'\'')) => {
                let end = lc[j + 1..].find(q as char)? + j + 1;
                Some(&open_tag[j + 1..end])
            }
            Some(_) => {
                let end = lc[j..]
                    .find(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/')
                    .map_or(lc.len(), |e| e + j);
                Some(&open_tag[j..end])
            }
            None => None,
        };
    }
    None
}

/// True if the opening tag's class list contains `class` (case-insensitive).
pub fn has_class(open_tag: &str, class: &str) -> bool {
    class_attr(open_tag)
        .is_some_and(|v| v.split_ascii_whitespace().any(|c| c.eq_ignore_ascii_case(class)))
}

fn next_element(doc: &str, lc: &str, tag: &str, class: &str, from: usize) -> Option<(usize, usize)> {
    let mut at = from;
    loop {
        let (start, open_end) = find_open_tag(lc, tag, at)?;
        if has_class(&doc[start..open_end], class) {
            let end = matching_close(lc, tag, open_end)?;
            return Some((start, end));
        }
        at = open_end;
    }
}

/// `(start, end)` of the next `<tag class="… class …">…</tag>` block at or
/// after `from`, nesting of the same tag respected.
pub fn element_block_ci(doc: &str, tag: &str, class: &str, from: usize) -> Option<(usize, usize)> {
    let lc = doc.to_ascii_lowercase();
    next_element(doc, &lc, &tag.to_ascii_lowercase(), class, from)
}

/// Every top-level `<tag class=…>` block in document order (outer HTML).
pub fn elements_ci<'a>(doc: &'a str, tag: &str, class: &str) -> Vec<&'a str> {
    let lc = doc.to_ascii_lowercase();
    let tag = tag.to_ascii_lowercase();
    let mut out = Vec::new();
    let mut at = 0;
    while let Some((s, e)) = next_element(doc, &lc, &tag, class, at) {
        out.push(&doc[s..e]);
        at = e;
    }
    out
}

/// First matching block inside `doc`, or `None`.
pub fn first_element_ci<'a>(doc: &'a str, tag: &str, class: &str) -> Option<&'a str> {
    element_block_ci(doc, tag, class, 0).map(|(s, e)| &doc[s..e])
}

/// Markup between the block's opening tag and its final close tag.
pub fn inner_after_open_tag(block: &str) -> &str {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return &block[oe + 1..cs];
            }
        }
    }
    ""
}

/// First non-empty text node of the block's inner markup, decoded and trimmed.
pub fn first_text(block: &str) -> String {
    let mut rest = inner_after_open_tag(block);
    loop {
        let (text, tail) = match rest.find('<') {
            Some(lt) => (&rest[..lt], Some(&rest[lt..])),
            None => (rest, None),
        };
        let cleaned = clean_text(text);
        if !cleaned.is_empty() {
            return cleaned;
        }
        let Some(tail) = tail else { return String::new() };
        let Some(gt) = tail.find('>') else { return String::new() };
        rest = &tail[gt + 1..];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_attr_handles_quotes_and_bare_values() {
        assert_eq!(class_attr(r#"<div class="review_box partial">"#), Some("review_box partial"));
        assert_eq!(class_attr("<div id='x' class='thumb'>"), Some("thumb"));
        assert_eq!(class_attr("<div class=content>"), Some("content"));
        assert_eq!(class_attr(r#"<div data-class="nope">"#), None);
    }

    #[test]
    fn class_match_is_per_token() {
        assert!(has_class(r#"<div class="a review_box b">"#, "review_box"));
        assert!(!has_class(r#"<div class="review_box_header">"#, "review_box"));
    }

    #[test]
    fn nested_blocks_are_balanced() {
        let doc = r#"<DIV class="outer"><div><div>x</div></div>tail</DIV><div class="outer">y</div>"#;
        let blocks = elements_ci(doc, "div", "outer");
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].ends_with("tail</DIV>"));
        assert_eq!(blocks[1], r#"<div class="outer">y</div>"#);
    }

    #[test]
    fn similar_tag_names_do_not_match() {
        let doc = r#"<divider class="x">no</divider><div class="x">yes</div>"#;
        assert_eq!(first_element_ci(doc, "div", "x"), Some(r#"<div class="x">yes</div>"#));
    }

    #[test]
    fn first_text_skips_markup_and_blank_nodes() {
        let block = "<div class=\"persona_name\">\n  <a href=\"/id/1\">Dismantler</a>\n</div>";
        assert_eq!(first_text(block), "Dismantler");

        let content = "<div class=\"content\">\n\t\tIt was &amp; is great<br>Really</div>";
        assert_eq!(first_text(content), "It was & is great");

        assert_eq!(first_text("<div class=\"content\"> <br> </div>"), "");
    }

    #[test]
    fn missing_close_tag_yields_nothing() {
        assert!(first_element_ci(r#"<div class="x">open forever"#, "div", "x").is_none());
    }
}
