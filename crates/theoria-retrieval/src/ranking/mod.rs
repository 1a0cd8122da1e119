//! Ranking: order scored candidates, assign ranks, truncate to `k`, and shape
//! them into [`SearchResult`]s.

pub mod pagination;

pub use pagination::paginate;

use std::collections::{BTreeMap, HashMap};

use theoria_core::constants::META_TITLE;
use theoria_core::models::{Candidate, SearchResult};

use crate::lexical::{build_highlights, snippet};

/// A candidate that survived filtering, with its composite score and the raw
/// signals behind it.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: f64,
    pub vector_score: Option<f64>,
    pub lexical_score: Option<f64>,
    pub osis_distance: Option<f64>,
}

/// Shapes ranked candidates into results.
#[derive(Debug, Clone)]
pub struct ResultBuilder<'a> {
    pub snippet_max_length: usize,
    pub highlight_window: usize,
    pub max_highlights: usize,
    /// Query tokens. Empty means no highlights are produced.
    pub tokens: &'a [String],
}

impl ResultBuilder<'_> {
    /// Stable sort by score descending, keep the top `k`, assign `rank` and
    /// `document_rank`, then build each result.
    ///
    /// Equal scores keep their input order.
    pub fn assemble(&self, mut scored: Vec<ScoredCandidate>, k: usize) -> Vec<SearchResult> {
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(k);

        let mut document_ranks: HashMap<String, usize> = HashMap::new();
        scored
            .into_iter()
            .enumerate()
            .map(|(i, s)| {
                let next = document_ranks.len() + 1;
                let document_rank = *document_ranks
                    .entry(s.candidate.document.id.clone())
                    .or_insert(next);
                self.build(s, i + 1, document_rank)
            })
            .collect()
    }

    fn build(&self, scored: ScoredCandidate, rank: usize, document_rank: usize) -> SearchResult {
        let ScoredCandidate {
            candidate,
            score,
            vector_score,
            lexical_score,
            osis_distance,
        } = scored;
        let Candidate { passage, document } = candidate;

        let highlights = (!self.tokens.is_empty()).then(|| {
            build_highlights(
                &passage.text,
                self.tokens,
                self.highlight_window,
                self.max_highlights,
            )
        });

        let mut meta = BTreeMap::new();
        if let Some(title) = document.title {
            meta.insert(META_TITLE.to_string(), serde_json::Value::String(title));
        }

        SearchResult {
            id: passage.id.clone(),
            document_id: document.id,
            passage_id: Some(passage.id),
            rank,
            document_rank,
            score,
            vector_score,
            lexical_score,
            osis_distance,
            snippet: snippet(&passage.text, self.snippet_max_length),
            text: passage.text,
            osis_ref: passage.osis_ref,
            highlights,
            meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use theoria_core::models::{Document, Passage};

    fn scored(passage_id: &str, document_id: &str, score: f64) -> ScoredCandidate {
        ScoredCandidate {
            candidate: Candidate::new(
                Passage {
                    id: passage_id.into(),
                    document_id: document_id.into(),
                    text: format!("text of {passage_id}"),
                    osis_ref: None,
                    page_no: None,
                    start_char: None,
                    end_char: None,
                    keywords: vec![],
                },
                Document {
                    id: document_id.into(),
                    title: Some(format!("Title {document_id}")),
                    collection: None,
                    authors: vec![],
                    source_type: None,
                    theological_tradition: None,
                    topic_domains: vec![],
                },
            ),
            score,
            vector_score: None,
            lexical_score: Some(score),
            osis_distance: None,
        }
    }

    fn builder(tokens: &[String]) -> ResultBuilder<'_> {
        ResultBuilder {
            snippet_max_length: 240,
            highlight_window: 160,
            max_highlights: 3,
            tokens,
        }
    }

    #[test]
    fn ranks_are_contiguous_and_scores_descend() {
        let input = vec![
            scored("p1", "d1", 1.0),
            scored("p2", "d2", 3.0),
            scored("p3", "d1", 2.0),
        ];
        let results = builder(&[]).assemble(input, 10);
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p3", "p1"]);
        let ranks: Vec<usize> = results.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn document_rank_follows_first_appearance() {
        let input = vec![
            scored("p1", "d1", 5.0),
            scored("p2", "d2", 4.0),
            scored("p3", "d1", 3.0),
            scored("p4", "d3", 2.0),
        ];
        let results = builder(&[]).assemble(input, 10);
        let doc_ranks: Vec<usize> = results.iter().map(|r| r.document_rank).collect();
        assert_eq!(doc_ranks, vec![1, 2, 1, 3]);
    }

    #[test]
    fn ties_keep_input_order() {
        let input = vec![
            scored("first", "d1", 1.0),
            scored("second", "d2", 1.0),
            scored("third", "d3", 1.0),
        ];
        let results = builder(&[]).assemble(input, 10);
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn truncates_after_sorting() {
        let input = vec![
            scored("low", "d1", 0.5),
            scored("high", "d2", 9.0),
            scored("mid", "d3", 4.0),
        ];
        let results = builder(&[]).assemble(input, 2);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "high");
        assert_eq!(results[1].id, "mid");
    }

    #[test]
    fn highlights_only_with_tokens() {
        let tokens = vec!["text".to_string()];
        let with = builder(&tokens).assemble(vec![scored("p1", "d1", 1.0)], 1);
        assert_eq!(with[0].highlights.as_ref().map(Vec::len), Some(1));

        let without = builder(&[]).assemble(vec![scored("p1", "d1", 1.0)], 1);
        assert!(without[0].highlights.is_none());
    }

    #[test]
    fn title_lands_in_meta() {
        let results = builder(&[]).assemble(vec![scored("p1", "d1", 1.0)], 1);
        assert_eq!(results[0].meta.get(META_TITLE), Some(&serde_json::json!("Title d1")));
        assert_eq!(results[0].passage_id.as_deref(), Some("p1"));
    }
}
