//! Snippets and highlight windows around query-token matches.

use std::collections::HashSet;

use theoria_core::constants::ELLIPSIS;

use super::tokenizer::is_word_boundary;

/// Truncate `text` to at most `max_length` characters. A truncated snippet
/// ends with `...` and still fits within `max_length`.
pub fn snippet(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let marker_len = ELLIPSIS.chars().count();
    if max_length <= marker_len {
        return ELLIPSIS.chars().take(max_length).collect();
    }
    let head: String = text.chars().take(max_length - marker_len).collect();
    format!("{}{}", head.trim_end(), ELLIPSIS)
}

/// Extract up to `max_highlights` windows of `window` characters centered on
/// whole-word matches of the distinct `tokens`.
///
/// A match already inside an emitted window is skipped and identical windows
/// are emitted once, so repeated matches in a short text give one highlight.
pub fn build_highlights(
    text: &str,
    tokens: &[String],
    window: usize,
    max_highlights: usize,
) -> Vec<String> {
    let mut highlights = Vec::new();
    if window == 0 || max_highlights == 0 {
        return highlights;
    }

    let chars: Vec<char> = text.chars().collect();
    let lowered: Vec<char> = chars
        .iter()
        .map(|c| c.to_lowercase().next().unwrap_or(*c))
        .collect();

    let mut distinct: HashSet<Vec<char>> = HashSet::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut covered: Vec<(usize, usize)> = Vec::new();

    for token in tokens {
        let needle: Vec<char> = token.to_lowercase().chars().collect();
        if needle.is_empty() || needle.len() > lowered.len() || !distinct.insert(needle.clone()) {
            continue;
        }

        for start in 0..=(lowered.len() - needle.len()) {
            let end = start + needle.len();
            if lowered[start..end] != needle[..] || !is_word_boundary(&lowered, start, end) {
                continue;
            }
            if covered.iter().any(|&(s, e)| start >= s && end <= e) {
                continue;
            }

            let center = start + needle.len() / 2;
            let from = center.saturating_sub(window / 2).min(start);
            let to = (from + window).max(end).min(chars.len());
            covered.push((from, to));

            let excerpt: String = chars[from..to].iter().collect();
            let excerpt = excerpt.trim().to_string();
            if excerpt.is_empty() || !seen.insert(excerpt.clone()) {
                continue;
            }
            highlights.push(excerpt);
            if highlights.len() >= max_highlights {
                return highlights;
            }
        }
    }

    highlights
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn snippet_returns_short_text_unchanged() {
        assert_eq!(snippet("In the beginning", 240), "In the beginning");
    }

    #[test]
    fn snippet_truncates_with_ellipsis_within_limit() {
        let text = "In the beginning was the Word, and the Word was with God";
        let s = snippet(text, 20);
        assert!(s.ends_with("..."));
        assert!(s.chars().count() <= 20);
        assert!(s.starts_with("In the beginning"));
    }

    #[test]
    fn snippet_handles_tiny_limits() {
        assert_eq!(snippet("abcdef", 3), "...");
        assert_eq!(snippet("abcdef", 0), "");
    }

    #[test]
    fn snippet_counts_characters_not_bytes() {
        let s = snippet("ἐν ἀρχῇ ἦν ὁ λόγος", 8);
        assert!(s.chars().count() <= 8);
    }

    #[test]
    fn repeated_matches_in_one_window_yield_one_highlight() {
        let highlights = build_highlights("tempor tempor tempor", &toks(&["tempor"]), 60, 3);
        assert_eq!(highlights, vec!["tempor tempor tempor".to_string()]);
    }

    #[test]
    fn distant_matches_yield_separate_highlights() {
        let filler = "lorem ".repeat(40);
        let text = format!("grace {filler}grace");
        let highlights = build_highlights(&text, &toks(&["grace"]), 20, 3);
        assert_eq!(highlights.len(), 2);
        assert!(highlights.iter().all(|h| h.to_lowercase().contains("grace")));
    }

    #[test]
    fn highlights_are_capped() {
        let filler = "x ".repeat(50);
        let text = format!("a {filler}b {filler}c {filler}d");
        let highlights = build_highlights(&text, &toks(&["a", "b", "c", "d"]), 10, 2);
        assert_eq!(highlights.len(), 2);
    }

    #[test]
    fn highlight_match_is_case_insensitive_and_whole_word() {
        assert_eq!(build_highlights("FAITHFUL", &toks(&["faith"]), 40, 3).len(), 0);
        assert_eq!(build_highlights("By FAITH alone", &toks(&["faith"]), 40, 3).len(), 1);
    }

    #[test]
    fn no_tokens_no_highlights() {
        assert!(build_highlights("text", &[], 40, 3).is_empty());
    }
}
