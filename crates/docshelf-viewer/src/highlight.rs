//! Case-insensitive substring matching and `<mark>` rendering.

use std::ops::Range;

/// Byte ranges of the non-overlapping case-insensitive occurrences of
/// `query` in `text`, left to right.
///
/// Comparison lowercases both sides per character, so ranges always fall on
/// character boundaries of the original `text`. An empty query matches
/// nothing.
#[must_use]
pub fn find_matches(text: &str, query: &str) -> Vec<Range<usize>> {
    let needle: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return Vec::new();
    }

    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut matches = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        if let Some(len) = match_len(&chars[start..], &needle) {
            let begin = chars[start].0;
            let end = chars.get(start + len).map_or(text.len(), |&(i, _)| i);
            matches.push(begin..end);
            start += len;
        } else {
            start += 1;
        }
    }
    matches
}

/// Number of characters of `chars` consumed by a match of `needle` at its
/// start, if it matches.
fn match_len(chars: &[(usize, char)], needle: &[char]) -> Option<usize> {
    let mut matched = 0;
    for (consumed, &(_, c)) in chars.iter().enumerate() {
        for lower in c.to_lowercase() {
            if needle.get(matched) != Some(&lower) {
                return None;
            }
            matched += 1;
        }
        if matched == needle.len() {
            return Some(consumed + 1);
        }
    }
    None
}

/// Whether `text` contains `query` ignoring case. An empty query is contained
/// in everything.
#[must_use]
pub fn contains_ignore_case(text: &str, query: &str) -> bool {
    query.is_empty() || !find_matches(text, query).is_empty()
}

/// Render `text` as escaped HTML with each range wrapped in `<mark>`.
///
/// `matches` must be sorted, non-overlapping and on character boundaries, as
/// returned by [`find_matches`].
#[must_use]
pub fn render_marked(text: &str, matches: &[Range<usize>]) -> String {
    let mut out = String::with_capacity(text.len() + matches.len() * 13);
    let mut cursor = 0;
    for range in matches {
        out.push_str(&html_escape::encode_text(&text[cursor..range.start]));
        out.push_str("<mark>");
        out.push_str(&html_escape::encode_text(&text[range.clone()]));
        out.push_str("</mark>");
        cursor = range.end;
    }
    out.push_str(&html_escape::encode_text(&text[cursor..]));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_find_matches_case_insensitive() {
        assert_eq!(find_matches("Getting Started", "start"), vec![8..13]);
        assert_eq!(find_matches("Getting Started", "GETTING"), vec![0..7]);
    }

    #[test]
    fn test_find_matches_all_occurrences() {
        assert_eq!(find_matches("abcABCabc", "abc"), vec![0..3, 3..6, 6..9]);
    }

    #[test]
    fn test_find_matches_non_overlapping() {
        assert_eq!(find_matches("aaaa", "aa"), vec![0..2, 2..4]);
    }

    #[test]
    fn test_find_matches_empty_query() {
        assert!(find_matches("anything", "").is_empty());
    }

    #[test]
    fn test_find_matches_no_match() {
        assert!(find_matches("Guide", "api").is_empty());
    }

    #[test]
    fn test_find_matches_cyrillic() {
        let text = "Установка Пакетов";

        let matches = find_matches(text, "пакет");

        assert_eq!(matches.len(), 1);
        assert_eq!(&text[matches[0].clone()], "Пакет");
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Reference", "FER"));
        assert!(contains_ignore_case("Reference", ""));
        assert!(!contains_ignore_case("Reference", "guide"));
    }

    #[test]
    fn test_render_marked() {
        let text = "Start here, start now";

        let html = render_marked(text, &find_matches(text, "start"));

        assert_eq!(html, "<mark>Start</mark> here, <mark>start</mark> now");
    }

    #[test]
    fn test_render_marked_escapes_text() {
        let text = "<b> & tags";

        let html = render_marked(text, &find_matches(text, "tag"));

        assert_eq!(html, "&lt;b&gt; &amp; <mark>tag</mark>s");
    }

    #[test]
    fn test_render_marked_without_matches_is_plain_text() {
        assert_eq!(render_marked("Plain", &[]), "Plain");
    }
}
