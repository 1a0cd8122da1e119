//! Native hybrid engine.
//!
//! Issues up to three storage-side queries (vector similarity, full-text,
//! keyword/OSIS metadata), merges them by passage id, then fuses the signals:
//!
//! ```text
//! score = vector_weight  * clamp(cosine, 0, 1)
//!       + lexical_weight * (lexical / max lexical)
//!       + keyword_weight * (keyword hits / distinct tokens)
//!       + native_osis_bonus            (exact OSIS match)
//! ```

use std::collections::{BTreeSet, HashMap};

use theoria_core::config::RetrievalConfig;
use theoria_core::errors::{EmbeddingError, TheoriaResult};
use theoria_core::models::{Candidate, KeywordQuery, SearchMode, SearchRequest, SearchResult};
use theoria_core::osis::{self, PositionSet};
use theoria_core::traits::{IAnnotationStore, IEmbeddingService, ISearchSession};
use tracing::debug;

use super::{osis_filter, FallbackSearchEngine};
use crate::enrichment::AnnotationEnricher;
use crate::guardrails;
use crate::lexical::tokenize;
use crate::ranking::{ResultBuilder, ScoredCandidate};

/// A candidate with whichever signals retrieved it. A missing signal stays
/// `None`; it is never read as zero relevance.
#[derive(Debug)]
struct Signals {
    candidate: Candidate,
    vector: Option<f64>,
    lexical: Option<f64>,
    keyword: Option<f64>,
}

/// Merges per-signal result lists by passage id in first-seen order.
#[derive(Default)]
struct SignalMerge {
    order: Vec<Signals>,
    index: HashMap<String, usize>,
}

impl SignalMerge {
    fn slot(&mut self, candidate: Candidate) -> &mut Signals {
        let position = match self.index.get(candidate.passage_id()) {
            Some(&i) => i,
            None => {
                let i = self.order.len();
                self.index.insert(candidate.passage_id().to_string(), i);
                self.order.push(Signals {
                    candidate,
                    vector: None,
                    lexical: None,
                    keyword: None,
                });
                i
            }
        };
        &mut self.order[position]
    }

    fn add_vector(&mut self, hits: Vec<(Candidate, f64)>) {
        for (candidate, score) in hits {
            self.slot(candidate).vector = Some(score);
        }
    }

    fn add_lexical(&mut self, hits: Vec<(Candidate, f64)>) {
        for (candidate, score) in hits {
            self.slot(candidate).lexical = Some(score);
        }
    }

    fn add_keyword(&mut self, hits: Vec<(Candidate, f64)>) {
        for (candidate, score) in hits {
            self.slot(candidate).keyword = Some(score);
        }
    }

    fn into_signals(self) -> Vec<Signals> {
        self.order
    }
}

/// One round of signal queries. `saturated` is set when any query filled
/// its limit, so more rows may exist in storage.
struct Fetch {
    signals: Vec<Signals>,
    saturated: bool,
}

/// Storage-side hybrid search with weighted signal fusion.
pub struct NativeSearchEngine<'a> {
    config: &'a RetrievalConfig,
    embeddings: Option<&'a dyn IEmbeddingService>,
    annotations: Option<&'a dyn IAnnotationStore>,
}

impl<'a> NativeSearchEngine<'a> {
    pub fn new(
        config: &'a RetrievalConfig,
        embeddings: Option<&'a dyn IEmbeddingService>,
        annotations: Option<&'a dyn IAnnotationStore>,
    ) -> Self {
        Self {
            config,
            embeddings,
            annotations,
        }
    }

    /// Run the request. Delegates to the fallback engine when the session
    /// cannot serve native queries.
    pub fn search(
        &self,
        session: &dyn ISearchSession,
        request: &SearchRequest,
    ) -> TheoriaResult<Vec<SearchResult>> {
        if !session.supports_native_hybrid() {
            debug!(backend = session.backend_name(), "native hybrid unavailable, using fallback");
            return FallbackSearchEngine::new(self.config, self.annotations).search(session, request);
        }
        if request.is_unanchored() || request.k == 0 {
            return Ok(Vec::new());
        }

        let query = request.query_text();
        let osis_anchor = request.osis_anchor();
        let mode = request.effective_mode();
        let tokens = query.map(tokenize).unwrap_or_default();
        let distinct_tokens = tokens.iter().collect::<BTreeSet<_>>().len();

        let embedding = match mode {
            SearchMode::Lexical => None,
            _ => self.embed_query(query)?,
        };
        let text = query.filter(|_| mode != SearchMode::Semantic);
        let keyword_query = (!tokens.is_empty() || osis_anchor.is_some()).then(|| KeywordQuery {
            tokens: tokens.clone(),
            osis: osis_anchor.map(str::to_string),
        });
        let anchor = osis_anchor.map(osis::expand);

        // Filters run after the fetch, so a saturated fetch that leaves fewer
        // than k survivors is retried with twice the limit.
        let mut limit = request.k.saturating_mul(self.config.candidate_multiplier.max(1));
        let scored = loop {
            let fetch = self.fetch(
                session,
                embedding.as_deref(),
                text,
                keyword_query.as_ref(),
                limit,
            )?;
            let scored = self.score(fetch.signals, request, anchor.as_ref(), distinct_tokens);
            if scored.len() >= request.k || !fetch.saturated || limit == usize::MAX {
                break scored;
            }
            debug!(scored = scored.len(), limit = limit, "widening native fetch");
            limit = limit.saturating_mul(2);
        };

        debug!(
            scored = scored.len(),
            limit = limit,
            mode = mode.as_str(),
            "native fusion complete"
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

    /// Run the signal queries at `limit` rows each and merge them.
    fn fetch(
        &self,
        session: &dyn ISearchSession,
        embedding: Option<&[f32]>,
        text: Option<&str>,
        keywords: Option<&KeywordQuery>,
        limit: usize,
    ) -> TheoriaResult<Fetch> {
        let mut merge = SignalMerge::default();
        let mut saturated = false;

        // Vector similarity.
        if let Some(embedding) = embedding {
            let hits = session.vector_candidates(embedding, limit)?;
            debug!(hits = hits.len(), "vector query");
            saturated |= hits.len() >= limit;
            merge.add_vector(hits);
        }

        // Full-text relevance.
        if let Some(text) = text {
            let hits = session.lexical_candidates(text, limit)?;
            debug!(hits = hits.len(), "full-text query");
            saturated |= hits.len() >= limit;
            merge.add_lexical(hits);
        }

        // Keyword metadata and OSIS.
        if let Some(keywords) = keywords {
            let hits = session.keyword_candidates(keywords, limit)?;
            debug!(hits = hits.len(), "keyword query");
            saturated |= hits.len() >= limit;
            merge.add_keyword(hits);
        }

        Ok(Fetch {
            signals: merge.into_signals(),
            saturated,
        })
    }

    /// Apply guardrails and the OSIS filter, then fuse the surviving signals.
    /// Candidates scoring `<= 0` are dropped.
    fn score(
        &self,
        signals: Vec<Signals>,
        request: &SearchRequest,
        anchor: Option<&PositionSet>,
        distinct_tokens: usize,
    ) -> Vec<ScoredCandidate> {
        let mut survivors = Vec::new();
        for signals in signals {
            if !guardrails::passes(&signals.candidate, &request.filters) {
                continue;
            }
            let Some(osis_distance) = osis_filter(&signals.candidate, anchor) else {
                continue;
            };
            survivors.push((signals, osis_distance));
        }

        let max_lexical = survivors
            .iter()
            .filter_map(|(s, _)| s.lexical)
            .fold(0.0_f64, f64::max);

        let mut scored = Vec::with_capacity(survivors.len());
        for (signals, osis_distance) in survivors {
            let score = self.composite(&signals, osis_distance, max_lexical, distinct_tokens);
            if score <= 0.0 {
                continue;
            }
            scored.push(ScoredCandidate {
                candidate: signals.candidate,
                score,
                vector_score: signals.vector,
                lexical_score: signals.lexical,
                osis_distance,
            });
        }
        scored
    }

    /// Embed the query when a query, a service and a configured dimension are
    /// all present. The returned vector is checked against that dimension.
    fn embed_query(&self, query: Option<&str>) -> TheoriaResult<Option<Vec<f32>>> {
        let (Some(query), Some(service)) = (query, self.embeddings) else {
            return Ok(None);
        };
        let Some(dimensions) = service.dimensions() else {
            return Ok(None);
        };

        let mut vectors = service.embed(&[query.to_string()])?;
        if vectors.len() != 1 {
            return Err(EmbeddingError::BatchSizeMismatch {
                requested: 1,
                returned: vectors.len(),
            }
            .into());
        }
        let embedding = vectors.remove(0);
        if embedding.len() != dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: dimensions,
                actual: embedding.len(),
            }
            .into());
        }
        Ok(Some(embedding))
    }

    fn composite(
        &self,
        signals: &Signals,
        osis_distance: Option<f64>,
        max_lexical: f64,
        distinct_tokens: usize,
    ) -> f64 {
        let vector = signals.vector.map_or(0.0, |v| v.clamp(0.0, 1.0));
        let lexical = match signals.lexical {
            Some(l) if max_lexical > 0.0 => (l / max_lexical).max(0.0),
            _ => 0.0,
        };
        let keyword = match signals.keyword {
            Some(hits) if distinct_tokens > 0 => (hits / distinct_tokens as f64).clamp(0.0, 1.0),
            _ => 0.0,
        };

        let mut score = self.config.vector_weight * vector
            + self.config.lexical_weight * lexical
            + self.config.keyword_weight * keyword;
        if osis_distance == Some(0.0) {
            score += self.config.native_osis_bonus;
        }
        score
    }
}
