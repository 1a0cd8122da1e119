//! v002: FTS5 index over passage text, with sync triggers.

use rusqlite::Connection;

use theoria_core::errors::TheoriaResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> TheoriaResult<()> {
    conn.execute_batch(
        "
        CREATE VIRTUAL TABLE IF NOT EXISTS passage_fts USING fts5(
            text,
            content='passages',
            content_rowid='seq'
        );

        CREATE TRIGGER IF NOT EXISTS passage_fts_insert AFTER INSERT ON passages BEGIN
            INSERT INTO passage_fts(rowid, text) VALUES (new.seq, new.text);
        END;

        CREATE TRIGGER IF NOT EXISTS passage_fts_delete BEFORE DELETE ON passages BEGIN
            INSERT INTO passage_fts(passage_fts, rowid, text)
            VALUES ('delete', old.seq, old.text);
        END;

        CREATE TRIGGER IF NOT EXISTS passage_fts_update AFTER UPDATE ON passages BEGIN
            INSERT INTO passage_fts(passage_fts, rowid, text)
            VALUES ('delete', old.seq, old.text);
            INSERT INTO passage_fts(rowid, text) VALUES (new.seq, new.text);
        END;

        -- Index passages stored before native mode was enabled.
        INSERT INTO passage_fts(passage_fts) VALUES ('rebuild');
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
