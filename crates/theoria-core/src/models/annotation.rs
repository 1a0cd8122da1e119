use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user annotation. Owned by the annotation store; read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: String,
    pub document_id: String,
    /// Passages this annotation is attached to.
    #[serde(default)]
    pub passage_ids: Vec<String>,
    pub body: String,
    #[serde(default = "chrono::Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Annotation {
    /// A fresh annotation with a generated id, created now.
    pub fn new(
        document_id: impl Into<String>,
        passage_ids: Vec<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            document_id: document_id.into(),
            passage_ids,
            body: body.into(),
            created_at: Utc::now(),
        }
    }
}
