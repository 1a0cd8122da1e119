//! Span names for retrieval operations.
//!
//! The dispatcher opens a `tracing` span under [`names::HYBRID_SEARCH`] and
//! hands span records with the same names to the instrumentation sink.

/// Span names as constants for programmatic use.
pub mod names {
    pub const HYBRID_SEARCH: &str = "retriever.hybrid_search";
    pub const NATIVE_SEARCH: &str = "retriever.native_search";
    pub const FALLBACK_SEARCH: &str = "retriever.fallback_search";
}
