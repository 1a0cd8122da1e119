//! Document and passage writes, the full scan, and candidate row parsing.

use rusqlite::{params, Connection, Row};

use theoria_core::errors::{StorageError, TheoriaError, TheoriaResult};
use theoria_core::models::{Candidate, Document, Passage};
use theoria_core::osis;

use super::vector_search;
use crate::to_storage_err;

/// Column list shared by every candidate query. `p` is passages, `d` documents.
pub(crate) const CANDIDATE_COLUMNS: &str = "p.id, p.document_id, p.text, p.osis_ref, p.page_no,
     p.start_char, p.end_char, p.keywords,
     d.id, d.title, d.collection, d.authors, d.source_type,
     d.theological_tradition, d.topic_domains";

/// A candidate row before its JSON columns are decoded.
pub(crate) struct RawCandidate {
    passage_id: String,
    document_id: String,
    text: String,
    osis_ref: Option<String>,
    page_no: Option<u32>,
    start_char: Option<u32>,
    end_char: Option<u32>,
    keywords: String,
    doc_id: String,
    title: Option<String>,
    collection: Option<String>,
    authors: String,
    source_type: Option<String>,
    theological_tradition: Option<String>,
    topic_domains: String,
}

/// Read the [`CANDIDATE_COLUMNS`] starting at column 0.
pub(crate) fn read_candidate_row(row: &Row<'_>) -> rusqlite::Result<RawCandidate> {
    Ok(RawCandidate {
        passage_id: row.get(0)?,
        document_id: row.get(1)?,
        text: row.get(2)?,
        osis_ref: row.get(3)?,
        page_no: row.get(4)?,
        start_char: row.get(5)?,
        end_char: row.get(6)?,
        keywords: row.get(7)?,
        doc_id: row.get(8)?,
        title: row.get(9)?,
        collection: row.get(10)?,
        authors: row.get(11)?,
        source_type: row.get(12)?,
        theological_tradition: row.get(13)?,
        topic_domains: row.get(14)?,
    })
}

impl RawCandidate {
    pub(crate) fn into_candidate(self) -> TheoriaResult<Candidate> {
        let keywords = decode_list(&self.passage_id, "keywords", &self.keywords)?;
        let authors = decode_list(&self.passage_id, "authors", &self.authors)?;
        let topic_domains = decode_list(&self.passage_id, "topic_domains", &self.topic_domains)?;
        Ok(Candidate::new(
            Passage {
                id: self.passage_id,
                document_id: self.document_id,
                text: self.text,
                osis_ref: self.osis_ref,
                page_no: self.page_no,
                start_char: self.start_char,
                end_char: self.end_char,
                keywords,
            },
            Document {
                id: self.doc_id,
                title: self.title,
                collection: self.collection,
                authors,
                source_type: self.source_type,
                theological_tradition: self.theological_tradition,
                topic_domains,
            },
        ))
    }
}

fn decode_list(passage_id: &str, column: &str, raw: &str) -> TheoriaResult<Vec<String>> {
    serde_json::from_str(raw).map_err(|e| {
        TheoriaError::from(StorageError::CorruptRow {
            passage_id: passage_id.to_string(),
            details: format!("{column}: {e}"),
        })
    })
}

/// Insert or replace a document.
pub fn insert_document(conn: &Connection, document: &Document) -> TheoriaResult<()> {
    let authors = serde_json::to_string(&document.authors)?;
    let topic_domains = serde_json::to_string(&document.topic_domains)?;
    conn.execute(
        "INSERT INTO documents (id, title, collection, authors, source_type,
                                theological_tradition, topic_domains)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(id) DO UPDATE SET
            title = excluded.title,
            collection = excluded.collection,
            authors = excluded.authors,
            source_type = excluded.source_type,
            theological_tradition = excluded.theological_tradition,
            topic_domains = excluded.topic_domains",
        params![
            document.id,
            document.title,
            document.collection,
            authors,
            document.source_type,
            document.theological_tradition,
            topic_domains,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Insert a passage and, when given, its embedding.
/// Wrapped in a SAVEPOINT: the passage and its embedding land together or not at all.
pub fn insert_passage(
    conn: &Connection,
    passage: &Passage,
    embedding: Option<&[f32]>,
) -> TheoriaResult<()> {
    conn.execute_batch("SAVEPOINT insert_passage")
        .map_err(|e| to_storage_err(format!("insert_passage savepoint: {e}")))?;

    match insert_passage_inner(conn, passage, embedding) {
        Ok(()) => {
            conn.execute_batch("RELEASE insert_passage")
                .map_err(|e| to_storage_err(format!("insert_passage release: {e}")))?;
            Ok(())
        }
        Err(e) => {
            let _ = conn.execute_batch("ROLLBACK TO insert_passage");
            let _ = conn.execute_batch("RELEASE insert_passage");
            Err(e)
        }
    }
}

fn insert_passage_inner(
    conn: &Connection,
    passage: &Passage,
    embedding: Option<&[f32]>,
) -> TheoriaResult<()> {
    let keywords = serde_json::to_string(&passage.keywords)?;
    let bounds = passage
        .osis_ref
        .as_deref()
        .and_then(|r| osis::expand(r).bounds());
    let (osis_start, osis_end) = match bounds {
        Some((lo, hi)) => (Some(lo as i64), Some(hi as i64)),
        None => (None, None),
    };

    conn.execute(
        "INSERT INTO passages (id, document_id, text, osis_ref, osis_start, osis_end,
                               page_no, start_char, end_char, keywords)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            passage.id,
            passage.document_id,
            passage.text,
            passage.osis_ref,
            osis_start,
            osis_end,
            passage.page_no,
            passage.start_char,
            passage.end_char,
            keywords,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    if let Some(embedding) = embedding {
        vector_search::store_embedding(conn, &passage.id, embedding)?;
    }
    Ok(())
}

/// Every candidate in insertion order.
pub fn scan_candidates(conn: &Connection) -> TheoriaResult<Vec<Candidate>> {
    let sql = format!(
        "SELECT {CANDIDATE_COLUMNS}
         FROM passages p
         JOIN documents d ON d.id = p.document_id
         ORDER BY p.seq"
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], read_candidate_row)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        let raw = row.map_err(|e| to_storage_err(e.to_string()))?;
        results.push(raw.into_candidate()?);
    }
    Ok(results)
}

/// Fetch a single candidate by passage id.
pub fn get_candidate(conn: &Connection, passage_id: &str) -> TheoriaResult<Option<Candidate>> {
    let sql = format!(
        "SELECT {CANDIDATE_COLUMNS}
         FROM passages p
         JOIN documents d ON d.id = p.document_id
         WHERE p.id = ?1"
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut rows = stmt
        .query_map(params![passage_id], read_candidate_row)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let first = rows.next();
    match first {
        Some(row) => {
            let raw = row.map_err(|e| to_storage_err(e.to_string()))?;
            Ok(Some(raw.into_candidate()?))
        }
        None => Ok(None),
    }
}

/// Number of stored passages.
pub fn count_passages(conn: &Connection) -> TheoriaResult<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM passages", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as usize)
}
