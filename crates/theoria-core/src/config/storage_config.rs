use serde::{Deserialize, Serialize};

use super::defaults;

/// Storage subsystem configuration for the SQLite reference session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    pub db_path: String,
    /// Create the FTS5 index and expose native hybrid capability.
    pub native_hybrid: bool,
    /// SQLite busy timeout in milliseconds.
    pub busy_timeout_ms: u32,
    /// SQLite page cache size (negative = KB).
    pub cache_size: i64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: defaults::DEFAULT_DB_FILENAME.to_string(),
            native_hybrid: defaults::DEFAULT_NATIVE_HYBRID,
            busy_timeout_ms: defaults::DEFAULT_BUSY_TIMEOUT_MS,
            cache_size: defaults::DEFAULT_CACHE_SIZE,
        }
    }
}
