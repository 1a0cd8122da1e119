//! # theoria-retrieval
//!
//! The passage retrieval engine. A request carrying free text and/or an OSIS
//! anchor plus metadata filters becomes a ranked list of passage hits.
//!
//! ## Architecture
//!
//! ```text
//! RetrievalEngine (dispatcher, instrumentation)
//! ├── NativeSearchEngine (session supports native hybrid)
//! │   ├── Vector query (embedding service)
//! │   ├── Full-text query
//! │   ├── Keyword / OSIS query
//! │   └── Signal merge + weighted fusion
//! ├── FallbackSearchEngine (full scan, in-memory scoring)
//! ├── Guardrails (hard metadata filters)
//! ├── OSIS resolver (position sets)
//! ├── Lexical (tokenize, term counts, snippets, highlights)
//! ├── Ranking (sort, rank, document rank, truncate, paginate)
//! └── AnnotationEnricher (batched by surviving documents)
//! ```

pub mod engine;
pub mod enrichment;
pub mod guardrails;
pub mod instrumentation;
pub mod lexical;
pub mod ranking;
pub mod search;

pub use theoria_core::osis;

pub use engine::RetrievalEngine;
pub use enrichment::AnnotationEnricher;
pub use search::{FallbackSearchEngine, NativeSearchEngine, SearchBackend};
