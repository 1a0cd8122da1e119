//! v001: documents, passages, passage embeddings, annotations.

use rusqlite::Connection;

use theoria_core::errors::TheoriaResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> TheoriaResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS documents (
            id                    TEXT PRIMARY KEY,
            title                 TEXT,
            collection            TEXT,
            authors               TEXT NOT NULL DEFAULT '[]',
            source_type           TEXT,
            theological_tradition TEXT,
            topic_domains         TEXT NOT NULL DEFAULT '[]'
        );

        -- seq gives the stable storage order the full scan returns.
        CREATE TABLE IF NOT EXISTS passages (
            seq         INTEGER PRIMARY KEY AUTOINCREMENT,
            id          TEXT NOT NULL UNIQUE,
            document_id TEXT NOT NULL REFERENCES documents(id) ON DELETE CASCADE,
            text        TEXT NOT NULL,
            osis_ref    TEXT,
            osis_start  INTEGER,
            osis_end    INTEGER,
            page_no     INTEGER,
            start_char  INTEGER,
            end_char    INTEGER,
            keywords    TEXT NOT NULL DEFAULT '[]'
        );
        CREATE INDEX IF NOT EXISTS idx_passages_document ON passages(document_id);
        CREATE INDEX IF NOT EXISTS idx_passages_osis ON passages(osis_start, osis_end);

        CREATE TABLE IF NOT EXISTS passage_embeddings (
            passage_id TEXT PRIMARY KEY REFERENCES passages(id) ON DELETE CASCADE,
            embedding  BLOB NOT NULL,
            dimensions INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS annotations (
            id          TEXT PRIMARY KEY,
            document_id TEXT NOT NULL,
            passage_ids TEXT NOT NULL DEFAULT '[]',
            body        TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_annotations_document ON annotations(document_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
