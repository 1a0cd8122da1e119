//! Fallback engine: scan every candidate and score it in memory.
//!
//! Score = lexical term count + keyword metadata hits + exact-OSIS bonus.
//! Used whenever the session cannot run native vector and full-text queries.

use theoria_core::config::RetrievalConfig;
use theoria_core::errors::TheoriaResult;
use theoria_core::models::{SearchRequest, SearchResult};
use theoria_core::osis;
use theoria_core::traits::{IAnnotationStore, ISearchSession};
use tracing::debug;

use super::osis_filter;
use crate::enrichment::AnnotationEnricher;
use crate::guardrails;
use crate::lexical::{lexical_score, tokenize};
use crate::ranking::{ResultBuilder, ScoredCandidate};

/// Full-scan search with in-memory scoring.
pub struct FallbackSearchEngine<'a> {
    config: &'a RetrievalConfig,
    annotations: Option<&'a dyn IAnnotationStore>,
}

impl<'a> FallbackSearchEngine<'a> {
    pub fn new(config: &'a RetrievalConfig, annotations: Option<&'a dyn IAnnotationStore>) -> Self {
        Self {
            config,
            annotations,
        }
    }

    /// Run the request against a full scan of `session`.
    pub fn search(
        &self,
        session: &dyn ISearchSession,
        request: &SearchRequest,
    ) -> TheoriaResult<Vec<SearchResult>> {
        if request.is_unanchored() || request.k == 0 {
            return Ok(Vec::new());
        }

        let tokens = request.query_text().map(tokenize).unwrap_or_default();
        let anchor = request.osis_anchor().map(osis::expand);

        let pool = session.scan_candidates()?;
        let pool_size = pool.len();

        let mut scored = Vec::new();
        for candidate in pool {
            if !guardrails::passes(&candidate, &request.filters) {
                continue;
            }
            let Some(osis_distance) = osis_filter(&candidate, anchor.as_ref()) else {
                continue;
            };

            let lexical = (!tokens.is_empty()).then(|| lexical_score(&candidate.passage.text, &tokens));
            let keyword_hits = tokens
                .iter()
                .filter(|t| {
                    candidate
                        .passage
                        .keywords
                        .iter()
                        .any(|k| k.to_lowercase() == **t)
                })
                .count();

            let mut score = lexical.unwrap_or(0.0)
                + keyword_hits as f64 * self.config.keyword_match_weight;
            if osis_distance == Some(0.0) {
                score += self.config.fallback_osis_bonus;
            }
            if score <= 0.0 {
                continue;
            }

            scored.push(ScoredCandidate {
                candidate,
                score,
                vector_score: None,
                lexical_score: lexical,
                osis_distance,
            });
        }

        debug!(
            pool = pool_size,
            scored = scored.len(),
            tokens = tokens.len(),
            "fallback scoring complete"
        );

        let builder = ResultBuilder {
            snippet_max_length: self.config.snippet_max_length,
            highlight_window: self.config.highlight_window,
            max_highlights: self.config.max_highlights,
            tokens: &tokens,
        };
        let mut results = builder.assemble(scored, request.k);
        AnnotationEnricher::new(self.annotations).enrich(&mut results)?;
        Ok(results)
    }
}
