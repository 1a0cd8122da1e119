use crate::errors::{StorageError, TheoriaResult};
use crate::models::{Candidate, KeywordQuery};

/// A storage session the retrieval engine reads candidates from.
///
/// Every backend supports the full scan. Backends with native vector and
/// full-text indexes report `supports_native_hybrid()` and implement the
/// three signal queries; the defaults reject them.
pub trait ISearchSession: Send + Sync {
    /// Short backend identifier, e.g. `"sqlite"`.
    fn backend_name(&self) -> &str;

    /// Whether vector, full-text and keyword queries are available right now.
    fn supports_native_hybrid(&self) -> bool;

    /// Every (passage, document) pair in stable storage order.
    fn scan_candidates(&self) -> TheoriaResult<Vec<Candidate>>;

    /// Passages by cosine similarity to `embedding`, best first.
    fn vector_candidates(
        &self,
        embedding: &[f32],
        limit: usize,
    ) -> TheoriaResult<Vec<(Candidate, f64)>> {
        let _ = (embedding, limit);
        Err(unsupported(self.backend_name(), "vector"))
    }

    /// Passages by full-text relevance (higher is better), best first.
    fn lexical_candidates(
        &self,
        query: &str,
        limit: usize,
    ) -> TheoriaResult<Vec<(Candidate, f64)>> {
        let _ = (query, limit);
        Err(unsupported(self.backend_name(), "lexical"))
    }

    /// Passages by keyword metadata hits; score is the number of matched tokens.
    fn keyword_candidates(
        &self,
        query: &KeywordQuery,
        limit: usize,
    ) -> TheoriaResult<Vec<(Candidate, f64)>> {
        let _ = (query, limit);
        Err(unsupported(self.backend_name(), "keyword"))
    }
}

fn unsupported(backend: &str, query: &str) -> crate::errors::TheoriaError {
    StorageError::UnsupportedQuery {
        backend: backend.to_string(),
        query: query.to_string(),
    }
    .into()
}
