//! Annotation storage and batched lookup by document.

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection};

use theoria_core::errors::{AnnotationError, TheoriaResult};
use theoria_core::models::Annotation;

use crate::to_storage_err;

/// Insert or replace an annotation.
pub fn insert_annotation(conn: &Connection, annotation: &Annotation) -> TheoriaResult<()> {
    let passage_ids = serde_json::to_string(&annotation.passage_ids)?;
    conn.execute(
        "INSERT INTO annotations (id, document_id, passage_ids, body, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(id) DO UPDATE SET
            document_id = excluded.document_id,
            passage_ids = excluded.passage_ids,
            body = excluded.body,
            created_at = excluded.created_at",
        params![
            annotation.id,
            annotation.document_id,
            passage_ids,
            annotation.body,
            annotation
                .created_at
                .to_rfc3339_opts(SecondsFormat::Micros, true),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Annotations for the given documents, grouped by document id, oldest first.
/// Documents without annotations are absent from the map.
pub fn load_for_documents(
    conn: &Connection,
    document_ids: &[String],
) -> TheoriaResult<HashMap<String, Vec<Annotation>>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, document_id, passage_ids, body, created_at
             FROM annotations
             WHERE document_id = ?1
             ORDER BY created_at, id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut mapping: HashMap<String, Vec<Annotation>> = HashMap::new();
    for document_id in document_ids {
        if mapping.contains_key(document_id) {
            continue;
        }
        let rows = stmt
            .query_map(params![document_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })
            .map_err(|e| to_storage_err(e.to_string()))?;

        let mut annotations = Vec::new();
        for row in rows {
            let (id, document_id, passage_ids, body, created_at) =
                row.map_err(|e| to_storage_err(e.to_string()))?;
            annotations.push(parse_annotation(id, document_id, &passage_ids, body, &created_at)?);
        }
        if !annotations.is_empty() {
            mapping.insert(document_id.clone(), annotations);
        }
    }
    Ok(mapping)
}

fn parse_annotation(
    id: String,
    document_id: String,
    passage_ids: &str,
    body: String,
    created_at: &str,
) -> TheoriaResult<Annotation> {
    let passage_ids: Vec<String> =
        serde_json::from_str(passage_ids).map_err(|e| AnnotationError::Malformed {
            annotation_id: id.clone(),
            reason: format!("passage_ids: {e}"),
        })?;
    let created_at = DateTime::parse_from_rfc3339(created_at)
        .map_err(|e| AnnotationError::Malformed {
            annotation_id: id.clone(),
            reason: format!("created_at: {e}"),
        })?
        .with_timezone(&Utc);
    Ok(Annotation {
        id,
        document_id,
        passage_ids,
        body,
        created_at,
    })
}
