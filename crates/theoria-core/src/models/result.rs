use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One ranked passage hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub document_id: String,
    pub passage_id: Option<String>,
    /// 1-based position in the full returned set.
    pub rank: usize,
    /// 1-based position among distinct documents, in first-seen order.
    pub document_rank: usize,
    pub score: f64,
    /// `None` means the passage was not retrieved by vector search.
    pub vector_score: Option<f64>,
    /// `None` means the passage was not scored lexically.
    pub lexical_score: Option<f64>,
    pub osis_distance: Option<f64>,
    pub text: String,
    pub snippet: String,
    pub osis_ref: Option<String>,
    pub highlights: Option<Vec<String>>,
    pub meta: BTreeMap<String, serde_json::Value>,
}

/// A slice of a ranked result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub items: Vec<SearchResult>,
    /// Cursor for the next page, `None` on the last page.
    pub next_cursor: Option<String>,
}
