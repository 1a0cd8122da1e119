//! Word tokenization and the term-frequency lexical score.

use std::collections::HashMap;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split text into lowercase word tokens, in order. Punctuation and whitespace
/// separate tokens and are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !is_word_char(c))
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Sum over `tokens` of the case-insensitive whole-word occurrences of each
/// token in `text`. Duplicate tokens are counted once per occurrence in `tokens`.
pub fn lexical_score(text: &str, tokens: &[String]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let mut counts: HashMap<String, usize> = HashMap::new();
    for word in tokenize(text) {
        *counts.entry(word).or_default() += 1;
    }
    tokens
        .iter()
        .map(|t| counts.get(&t.to_lowercase()).copied().unwrap_or(0))
        .sum::<usize>() as f64
}

pub(crate) fn is_word_boundary(chars: &[char], start: usize, end: usize) -> bool {
    let before = start == 0 || !is_word_char(chars[start - 1]);
    let after = end >= chars.len() || !is_word_char(chars[end]);
    before && after
}
