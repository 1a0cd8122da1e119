mod annotation_error;
mod config_error;
mod embedding_error;
mod instrumentation_error;
mod storage_error;

pub use annotation_error::AnnotationError;
pub use config_error::ConfigError;
pub use embedding_error::EmbeddingError;
pub use instrumentation_error::InstrumentationError;
pub use storage_error::StorageError;

/// Top-level error for the Theoria retrieval workspace.
///
/// Collaborators return their own subsystem variant; the retrieval engine
/// propagates it unchanged.
#[derive(Debug, thiserror::Error)]
pub enum TheoriaError {
    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("annotation error: {0}")]
    AnnotationError(#[from] AnnotationError),

    #[error("instrumentation error: {0}")]
    InstrumentationError(#[from] InstrumentationError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type TheoriaResult<T> = Result<T, TheoriaError>;
