//! StorageEngine: owns the SQLite connection, runs migrations and pragmas on
//! open, implements ISearchSession + IAnnotationStore.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use theoria_core::config::StorageConfig;
use theoria_core::errors::TheoriaResult;
use theoria_core::models::{Annotation, Candidate, Document, KeywordQuery, Passage};
use theoria_core::traits::{IAnnotationStore, ISearchSession};
use theoria_observability::tracing_setup::events;

use crate::queries::{annotation_ops, keyword_search, passage_crud, passage_search, vector_search};
use crate::{migrations, pragmas, to_storage_err};

const BACKEND_NAME: &str = "sqlite";

/// SQLite search session. The single connection is guarded by a mutex, so a
/// shared engine serializes its queries.
pub struct StorageEngine {
    conn: Mutex<Connection>,
    native: bool,
}

impl StorageEngine {
    /// Open a database file. `config.native_hybrid` decides whether the
    /// full-text index is maintained and native queries are offered.
    pub fn open(path: &Path, config: &StorageConfig) -> TheoriaResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        Self::initialize(conn, config, false)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory(native: bool) -> TheoriaResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        let config = StorageConfig {
            native_hybrid: native,
            ..StorageConfig::default()
        };
        Self::initialize(conn, &config, true)
    }

    fn initialize(conn: Connection, config: &StorageConfig, in_memory: bool) -> TheoriaResult<Self> {
        pragmas::apply_pragmas(&conn, config, in_memory)?;
        migrations::run_migrations(&conn, config.native_hybrid)?;
        events::session_opened(BACKEND_NAME, config.native_hybrid);
        Ok(Self {
            conn: Mutex::new(conn),
            native: config.native_hybrid,
        })
    }

    /// Run `f` with the connection held.
    pub fn with_conn<F, T>(&self, f: F) -> TheoriaResult<T>
    where
        F: FnOnce(&Connection) -> TheoriaResult<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| to_storage_err(format!("connection lock poisoned: {e}")))?;
        f(&*conn)
    }

    pub fn insert_document(&self, document: &Document) -> TheoriaResult<()> {
        self.with_conn(|conn| passage_crud::insert_document(conn, document))
    }

    /// Insert a passage, optionally with its embedding.
    pub fn insert_passage(&self, passage: &Passage, embedding: Option<&[f32]>) -> TheoriaResult<()> {
        self.with_conn(|conn| passage_crud::insert_passage(conn, passage, embedding))
    }

    /// Store or replace a passage embedding.
    pub fn store_embedding(&self, passage_id: &str, embedding: &[f32]) -> TheoriaResult<()> {
        self.with_conn(|conn| vector_search::store_embedding(conn, passage_id, embedding))
    }

    pub fn insert_annotation(&self, annotation: &Annotation) -> TheoriaResult<()> {
        self.with_conn(|conn| annotation_ops::insert_annotation(conn, annotation))
    }

    pub fn passage_count(&self) -> TheoriaResult<usize> {
        self.with_conn(passage_crud::count_passages)
    }

    /// Highest applied schema version.
    pub fn schema_version(&self) -> TheoriaResult<u32> {
        self.with_conn(migrations::current_version)
    }

    fn has_fts_index(&self) -> TheoriaResult<bool> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'passage_fts')",
                [],
                |row| row.get(0),
            )
            .map_err(|e| to_storage_err(e.to_string()))
        })
    }
}

impl ISearchSession for StorageEngine {
    fn backend_name(&self) -> &str {
        BACKEND_NAME
    }

    fn supports_native_hybrid(&self) -> bool {
        if !self.native {
            return false;
        }
        match self.has_fts_index() {
            Ok(present) => present,
            Err(error) => {
                events::capability_check_failed(BACKEND_NAME, &error.to_string());
                false
            }
        }
    }

    fn scan_candidates(&self) -> TheoriaResult<Vec<Candidate>> {
        self.with_conn(passage_crud::scan_candidates)
    }

    fn vector_candidates(
        &self,
        embedding: &[f32],
        limit: usize,
    ) -> TheoriaResult<Vec<(Candidate, f64)>> {
        self.with_conn(|conn| vector_search::search_vector(conn, embedding, limit))
    }

    fn lexical_candidates(&self, query: &str, limit: usize) -> TheoriaResult<Vec<(Candidate, f64)>> {
        self.with_conn(|conn| passage_search::search_fts5(conn, query, limit))
    }

    fn keyword_candidates(
        &self,
        query: &KeywordQuery,
        limit: usize,
    ) -> TheoriaResult<Vec<(Candidate, f64)>> {
        self.with_conn(|conn| keyword_search::search_keywords(conn, query, limit))
    }
}

impl IAnnotationStore for StorageEngine {
    fn load_for_documents(
        &self,
        document_ids: &[String],
    ) -> TheoriaResult<HashMap<String, Vec<Annotation>>> {
        self.with_conn(|conn| annotation_ops::load_for_documents(conn, document_ids))
    }
}
