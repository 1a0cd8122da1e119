use serde::{Deserialize, Serialize};

use crate::config::defaults::DEFAULT_K;

/// Which signals the native engine consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Hybrid,
    Lexical,
    Semantic,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hybrid => "hybrid",
            Self::Lexical => "lexical",
            Self::Semantic => "semantic",
        }
    }
}

/// Hard metadata filters. A candidate failing any set field is excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    pub collection: Option<String>,
    pub author: Option<String>,
    pub source_type: Option<String>,
    pub theological_tradition: Option<String>,
    pub topic_domain: Option<String>,
}

impl SearchFilters {
    /// Active filters as `(name, value)` pairs in a fixed order.
    pub fn active(&self) -> Vec<(&'static str, &str)> {
        [
            ("collection", self.collection.as_deref()),
            ("author", self.author.as_deref()),
            ("source_type", self.source_type.as_deref()),
            ("theological_tradition", self.theological_tradition.as_deref()),
            ("topic_domain", self.topic_domain.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.active().is_empty()
    }
}

fn default_k() -> usize {
    DEFAULT_K
}

/// An immutable hybrid search request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub osis: Option<String>,
    #[serde(default)]
    pub filters: SearchFilters,
    #[serde(default = "default_k")]
    pub k: usize,
    #[serde(default)]
    pub cursor: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub mode: Option<SearchMode>,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: None,
            osis: None,
            filters: SearchFilters::default(),
            k: DEFAULT_K,
            cursor: None,
            limit: None,
            mode: None,
        }
    }
}

impl SearchRequest {
    /// A free-text request.
    pub fn for_query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Default::default()
        }
    }

    /// A reference-anchored request.
    pub fn for_osis(osis: impl Into<String>) -> Self {
        Self {
            osis: Some(osis.into()),
            ..Default::default()
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_osis(mut self, osis: impl Into<String>) -> Self {
        self.osis = Some(osis.into());
        self
    }

    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_page(mut self, cursor: Option<String>, limit: Option<usize>) -> Self {
        self.cursor = cursor;
        self.limit = limit;
        self
    }

    /// Query text with surrounding whitespace removed; blank queries are `None`.
    pub fn query_text(&self) -> Option<&str> {
        self.query.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    /// OSIS anchor with surrounding whitespace removed; blank anchors are `None`.
    pub fn osis_anchor(&self) -> Option<&str> {
        self.osis.as_deref().map(str::trim).filter(|o| !o.is_empty())
    }

    /// True when neither a query nor an OSIS anchor is present.
    pub fn is_unanchored(&self) -> bool {
        self.query_text().is_none() && self.osis_anchor().is_none()
    }

    pub fn effective_mode(&self) -> SearchMode {
        self.mode.unwrap_or_default()
    }
}
