/// Storage-layer errors raised by search session adapters.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("query not supported by {backend} backend: {query}")]
    UnsupportedQuery { backend: String, query: String },

    #[error("corrupt row for passage {passage_id}: {details}")]
    CorruptRow { passage_id: String, details: String },
}
