//! Hard metadata filters applied before scoring.
//!
//! A candidate whose document fails any active filter is excluded outright,
//! whatever its relevance. Comparison is case-sensitive string equality; list
//! attributes (authors, topic domains) pass when one element is equal.

use theoria_core::models::{Candidate, Document, SearchFilters};

/// Whether `document` satisfies every active filter.
pub fn allowed(document: &Document, filters: &SearchFilters) -> bool {
    matches_scalar(document.collection.as_deref(), filters.collection.as_deref())
        && matches_list(&document.authors, filters.author.as_deref())
        && matches_scalar(document.source_type.as_deref(), filters.source_type.as_deref())
        && matches_scalar(
            document.theological_tradition.as_deref(),
            filters.theological_tradition.as_deref(),
        )
        && matches_list(&document.topic_domains, filters.topic_domain.as_deref())
}

/// Candidate form of [`allowed`].
pub fn passes(candidate: &Candidate, filters: &SearchFilters) -> bool {
    allowed(&candidate.document, filters)
}

fn matches_scalar(value: Option<&str>, filter: Option<&str>) -> bool {
    match filter {
        None => true,
        Some(expected) => value == Some(expected),
    }
}

fn matches_list(values: &[String], filter: Option<&str>) -> bool {
    match filter {
        None => true,
        Some(expected) => values.iter().any(|v| v == expected),
    }
}
