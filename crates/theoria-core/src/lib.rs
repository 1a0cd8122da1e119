//! # theoria-core
//!
//! Foundation crate for the Theoria retrieval engine.
//! Defines the passage/document model, search request and result types,
//! the collaborator traits the engine consumes, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod osis;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::TheoriaConfig;
pub use errors::{TheoriaError, TheoriaResult};
pub use models::{
    Annotation, Candidate, Document, Passage, SearchFilters, SearchMode, SearchRequest,
    SearchResult,
};
