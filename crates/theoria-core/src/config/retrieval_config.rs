use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::SearchRequest;

/// Retrieval engine configuration.
///
/// The fallback and native engines are calibrated independently: scores are
/// comparable within one engine, not across engines.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Result count used when a request does not set `k`.
    pub default_k: usize,
    /// Maximum snippet length in characters.
    pub snippet_max_length: usize,
    /// Highlight window size in characters.
    pub highlight_window: usize,
    /// Maximum highlights per result.
    pub max_highlights: usize,
    /// Native engine fetches `k * candidate_multiplier` rows per signal query.
    pub candidate_multiplier: usize,
    /// Fallback: score added per query token found in passage keywords.
    pub keyword_match_weight: f64,
    /// Fallback: score added on an exact OSIS match.
    pub fallback_osis_bonus: f64,
    /// Native: weight of the clamped cosine similarity.
    pub vector_weight: f64,
    /// Native: weight of the max-normalized full-text relevance.
    pub lexical_weight: f64,
    /// Native: weight of the keyword hit ratio.
    pub keyword_weight: f64,
    /// Native: score added on an exact OSIS match.
    pub native_osis_bonus: f64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_k: defaults::DEFAULT_K,
            snippet_max_length: defaults::DEFAULT_SNIPPET_MAX_LENGTH,
            highlight_window: defaults::DEFAULT_HIGHLIGHT_WINDOW,
            max_highlights: defaults::DEFAULT_MAX_HIGHLIGHTS,
            candidate_multiplier: defaults::DEFAULT_CANDIDATE_MULTIPLIER,
            keyword_match_weight: defaults::DEFAULT_KEYWORD_MATCH_WEIGHT,
            fallback_osis_bonus: defaults::DEFAULT_FALLBACK_OSIS_BONUS,
            vector_weight: defaults::DEFAULT_VECTOR_WEIGHT,
            lexical_weight: defaults::DEFAULT_LEXICAL_WEIGHT,
            keyword_weight: defaults::DEFAULT_KEYWORD_WEIGHT,
            native_osis_bonus: defaults::DEFAULT_NATIVE_OSIS_BONUS,
        }
    }
}

impl RetrievalConfig {
    /// An empty request carrying this configuration's `default_k`.
    pub fn request(&self) -> SearchRequest {
        SearchRequest {
            k: self.default_k,
            ..SearchRequest::default()
        }
    }
}
