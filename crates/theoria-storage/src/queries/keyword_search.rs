//! Keyword metadata and OSIS window query.

use std::collections::BTreeSet;

use rusqlite::{params, Connection};

use theoria_core::errors::TheoriaResult;
use theoria_core::models::{Candidate, KeywordQuery};
use theoria_core::osis;

use super::passage_crud::{read_candidate_row, CANDIDATE_COLUMNS};
use crate::to_storage_err;

/// Passages whose keywords contain query tokens, plus passages whose OSIS
/// bounds overlap the anchor's. Score is the number of distinct query tokens
/// found among the passage keywords (case-insensitive).
///
/// Bounds overlap is a coarse prefilter; exact intersection is left to the
/// caller. Ordered by hits descending, then storage order.
pub fn search_keywords(
    conn: &Connection,
    query: &KeywordQuery,
    limit: usize,
) -> TheoriaResult<Vec<(Candidate, f64)>> {
    let tokens: BTreeSet<String> = query.tokens.iter().map(|t| t.to_lowercase()).collect();
    let bounds = query
        .osis
        .as_deref()
        .and_then(|r| osis::expand(r).bounds())
        .map(|(lo, hi)| (lo as i64, hi as i64));

    if tokens.is_empty() && bounds.is_none() {
        return Ok(Vec::new());
    }

    let (anchor_lo, anchor_hi) = bounds.unwrap_or((-1, -1));
    let sql = format!(
        "SELECT {CANDIDATE_COLUMNS}, p.seq
         FROM passages p
         JOIN documents d ON d.id = p.document_id
         WHERE (?1 AND p.keywords <> '[]')
            OR (?2 AND p.osis_start <= ?4 AND p.osis_end >= ?3)
         ORDER BY p.seq"
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(
            params![!tokens.is_empty(), bounds.is_some(), anchor_lo, anchor_hi],
            |row| {
                let raw = read_candidate_row(row)?;
                let seq: i64 = row.get(15)?;
                Ok((raw, seq))
            },
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut scored: Vec<(Candidate, f64, bool, i64)> = Vec::new();
    for row in rows {
        let (raw, seq) = row.map_err(|e| to_storage_err(e.to_string()))?;
        let candidate = raw.into_candidate()?;
        let keywords: BTreeSet<String> = candidate
            .passage
            .keywords
            .iter()
            .map(|k| k.to_lowercase())
            .collect();
        let hits = tokens.intersection(&keywords).count();
        let in_window = match (bounds, candidate.passage.osis_ref.as_deref()) {
            (Some((lo, hi)), Some(osis_ref)) => osis::expand(osis_ref)
                .bounds()
                .is_some_and(|(start, end)| start as i64 <= hi && end as i64 >= lo),
            _ => false,
        };
        if hits == 0 && !in_window {
            continue;
        }
        scored.push((candidate, hits as f64, in_window, seq));
    }

    // Hits first, then OSIS-window passages, then storage order.
    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.2.cmp(&a.2))
            .then_with(|| a.3.cmp(&b.3))
    });
    scored.truncate(limit);
    Ok(scored
        .into_iter()
        .map(|(candidate, hits, _, _)| (candidate, hits))
        .collect())
}
