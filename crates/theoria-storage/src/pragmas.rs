//! PRAGMA configuration applied when a connection is opened.
//!
//! WAL mode (file-backed only), NORMAL sync, configurable cache and
//! busy_timeout, foreign_keys ON.

use rusqlite::Connection;

use theoria_core::config::StorageConfig;
use theoria_core::errors::TheoriaResult;

use crate::to_storage_err;

/// Apply performance and safety pragmas to a connection.
pub fn apply_pragmas(conn: &Connection, config: &StorageConfig, in_memory: bool) -> TheoriaResult<()> {
    if !in_memory {
        conn.execute_batch("PRAGMA journal_mode = WAL;")
            .map_err(|e| to_storage_err(e.to_string()))?;
    }
    conn.execute_batch(&format!(
        "
        PRAGMA synchronous = NORMAL;
        PRAGMA cache_size = {};
        PRAGMA busy_timeout = {};
        PRAGMA foreign_keys = ON;
        PRAGMA temp_store = MEMORY;
        ",
        config.cache_size, config.busy_timeout_ms
    ))
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Verify that WAL mode is active on a connection.
pub fn verify_wal_mode(conn: &Connection) -> TheoriaResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
