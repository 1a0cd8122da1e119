use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Provider name.
    pub provider: String,
    /// Output dimensionality. `None` disables the vector signal.
    pub dimensions: Option<usize>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            dimensions: Some(defaults::DEFAULT_EMBEDDING_DIMENSIONS),
        }
    }
}
