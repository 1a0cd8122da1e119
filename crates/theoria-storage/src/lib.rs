//! # theoria-storage
//!
//! SQLite-backed search session. Stores documents, passages, passage
//! embeddings and annotations; serves the full scan, FTS5 full-text,
//! brute-force vector and keyword/OSIS queries the retrieval engine issues.
//!
//! The FTS5 index only exists in native mode, so the same schema can stand in
//! for a backend without native hybrid support.

pub mod engine;
pub mod migrations;
pub mod pragmas;
pub mod queries;

pub use engine::StorageEngine;

use theoria_core::errors::{StorageError, TheoriaError};

/// Convert a rusqlite failure message into the storage error variant.
pub(crate) fn to_storage_err(message: String) -> TheoriaError {
    StorageError::SqliteError { message }.into()
}
