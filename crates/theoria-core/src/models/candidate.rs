use serde::{Deserialize, Serialize};

/// A passage of a source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    pub id: String,
    pub document_id: String,
    pub text: String,
    /// OSIS reference covered by this passage, e.g. `John.3.16-John.3.18`.
    #[serde(default)]
    pub osis_ref: Option<String>,
    #[serde(default)]
    pub page_no: Option<u32>,
    #[serde(default)]
    pub start_char: Option<u32>,
    #[serde(default)]
    pub end_char: Option<u32>,
    /// TEI/keyword metadata, matched independently of the passage text.
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Document attributes needed for ranking output and guardrails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub collection: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub source_type: Option<String>,
    #[serde(default)]
    pub theological_tradition: Option<String>,
    #[serde(default)]
    pub topic_domains: Vec<String>,
}

/// A (passage, document) pair surfaced by a storage query.
/// Built at the storage boundary and discarded after ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub passage: Passage,
    pub document: Document,
}

impl Candidate {
    pub fn new(passage: Passage, document: Document) -> Self {
        Self { passage, document }
    }

    pub fn passage_id(&self) -> &str {
        &self.passage.id
    }

    pub fn document_id(&self) -> &str {
        &self.document.id
    }
}

/// Structured-metadata query issued by the native engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordQuery {
    /// Lowercase query tokens matched against passage keywords.
    pub tokens: Vec<String>,
    /// When set, passages carrying any OSIS reference are also returned.
    pub osis: Option<String>,
}
