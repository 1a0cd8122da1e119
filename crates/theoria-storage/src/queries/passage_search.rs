//! FTS5 full-text search over passage text.

use rusqlite::{params, Connection};

use theoria_core::errors::TheoriaResult;
use theoria_core::models::Candidate;

use super::passage_crud::{read_candidate_row, CANDIDATE_COLUMNS};
use crate::to_storage_err;

/// Build an FTS5 MATCH expression: every word of `query` as a quoted term,
/// joined with OR. `None` when the query has no words.
pub fn match_expression(query: &str) -> Option<String> {
    let terms: Vec<String> = query
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
        .map(|t| format!("\"{}\"", t.to_lowercase()))
        .collect();
    (!terms.is_empty()).then(|| terms.join(" OR "))
}

/// Search passages with FTS5. Scores are negated BM25, so higher is better.
pub fn search_fts5(
    conn: &Connection,
    query: &str,
    limit: usize,
) -> TheoriaResult<Vec<(Candidate, f64)>> {
    let Some(expression) = match_expression(query) else {
        return Ok(Vec::new());
    };

    let sql = format!(
        "SELECT {CANDIDATE_COLUMNS}, -bm25(passage_fts) AS relevance
         FROM passage_fts
         JOIN passages p ON p.seq = passage_fts.rowid
         JOIN documents d ON d.id = p.document_id
         WHERE passage_fts MATCH ?1
         ORDER BY relevance DESC, p.seq
         LIMIT ?2"
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![expression, limit as i64], |row| {
            let raw = read_candidate_row(row)?;
            let relevance: f64 = row.get(15)?;
            Ok((raw, relevance))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        let (raw, relevance) = row.map_err(|e| to_storage_err(e.to_string()))?;
        results.push((raw.into_candidate()?, relevance));
    }
    Ok(results)
}
