//! Passage embeddings: storage and brute-force cosine similarity search.

use rusqlite::{params, Connection};

use theoria_core::errors::TheoriaResult;
use theoria_core::models::Candidate;

use super::passage_crud;
use crate::to_storage_err;

/// Search passages by cosine similarity to `query_embedding`.
/// Returns (candidate, cosine_similarity) pairs ordered by similarity descending.
///
/// Zero-norm queries return nothing. Stored vectors with a different
/// dimensionality are skipped, as are non-positive similarities.
pub fn search_vector(
    conn: &Connection,
    query_embedding: &[f32],
    limit: usize,
) -> TheoriaResult<Vec<(Candidate, f64)>> {
    let query_norm_sq: f64 = query_embedding
        .iter()
        .map(|x| (*x as f64) * (*x as f64))
        .sum();
    if query_norm_sq == 0.0 {
        return Ok(vec![]);
    }
    let query_len = query_embedding.len();

    let mut stmt = conn
        .prepare(
            "SELECT pe.passage_id, pe.embedding, pe.dimensions
             FROM passage_embeddings pe
             JOIN passages p ON p.id = pe.passage_id
             ORDER BY p.seq",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            let passage_id: String = row.get(0)?;
            let embedding_blob: Vec<u8> = row.get(1)?;
            let dimensions: i64 = row.get(2)?;
            Ok((passage_id, embedding_blob, dimensions))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut scored: Vec<(String, f64)> = Vec::new();
    for row in rows {
        let (passage_id, blob, dims) = row.map_err(|e| to_storage_err(e.to_string()))?;
        if dims as usize != query_len {
            continue;
        }
        let stored = bytes_to_f32_vec(&blob, query_len);
        let sim = cosine_similarity(query_embedding, &stored);
        if sim > 0.0 {
            scored.push((passage_id, sim));
        }
    }

    // Stable: equal similarities keep storage order.
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);

    let mut results = Vec::with_capacity(scored.len());
    for (passage_id, sim) in scored {
        if let Some(candidate) = passage_crud::get_candidate(conn, &passage_id)? {
            results.push((candidate, sim));
        }
    }
    Ok(results)
}

/// Store or replace the embedding of a passage.
pub fn store_embedding(conn: &Connection, passage_id: &str, embedding: &[f32]) -> TheoriaResult<()> {
    let blob = f32_vec_to_bytes(embedding);
    conn.execute(
        "INSERT INTO passage_embeddings (passage_id, embedding, dimensions)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(passage_id) DO UPDATE SET
            embedding = excluded.embedding,
            dimensions = excluded.dimensions",
        params![passage_id, blob, embedding.len() as i64],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Convert f32 slice to bytes (little-endian).
fn f32_vec_to_bytes(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Convert bytes back to f32 vec.
fn bytes_to_f32_vec(bytes: &[u8], expected_dims: usize) -> Vec<f32> {
    let mut result = Vec::with_capacity(expected_dims);
    for chunk in bytes.chunks_exact(4) {
        result.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }
    result
}

/// Cosine similarity between two vectors.
pub(crate) fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (*x as f64) * (*y as f64))
        .sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_conversion_preserves_values() {
        let v = vec![0.25_f32, -1.5, 3.0];
        assert_eq!(bytes_to_f32_vec(&f32_vec_to_bytes(&v), 3), v);
    }

    #[test]
    fn cosine_of_parallel_vectors_is_one() {
        let sim = cosine_similarity(&[1.0, 2.0], &[2.0, 4.0]);
        assert!((sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn cosine_with_zero_vector_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}
