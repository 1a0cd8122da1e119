//! Versioned schema migrations, tracked in `schema_version`.
//!
//! v001 is the base schema. v002 (the FTS5 index) only runs when the session
//! is opened in native mode; a database opened later in native mode gets the
//! index built from the passages already stored.

mod v001_initial_schema;
mod v002_passage_fts;

use rusqlite::{params, Connection};
use tracing::info;

use theoria_core::errors::{StorageError, TheoriaResult};

use crate::to_storage_err;

type Migration = fn(&Connection) -> TheoriaResult<()>;

const BASE_MIGRATIONS: &[(u32, &str, Migration)] =
    &[(1, "initial_schema", v001_initial_schema::migrate)];

const FTS_MIGRATION: (u32, &str, Migration) = (2, "passage_fts", v002_passage_fts::migrate);

/// Apply every pending migration. `native` adds the full-text index.
pub fn run_migrations(conn: &Connection, native: bool) -> TheoriaResult<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let mut pending: Vec<(u32, &str, Migration)> = BASE_MIGRATIONS.to_vec();
    if native {
        pending.push(FTS_MIGRATION);
    }

    let mut applied = 0;
    for (version, name, migrate) in pending {
        if is_applied(conn, version)? {
            continue;
        }
        migrate(conn).map_err(|e| StorageError::MigrationFailed {
            version,
            reason: e.to_string(),
        })?;
        conn.execute(
            "INSERT INTO schema_version (version, name) VALUES (?1, ?2)",
            params![version, name],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        info!(version, name, "applied migration");
        applied += 1;
    }
    Ok(applied)
}

/// Highest applied version, 0 on a fresh database.
pub fn current_version(conn: &Connection) -> TheoriaResult<u32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

fn is_applied(conn: &Connection, version: u32) -> TheoriaResult<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM schema_version WHERE version = ?1)",
        params![version],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}
