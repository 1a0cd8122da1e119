//! # theoria-embeddings
//!
//! Embedding services behind [`IEmbeddingService`]. The built-in provider is
//! a feature-hashing embedder: deterministic, dependency-free, and always
//! available. Neural providers plug in through the same trait.

pub mod providers;

pub use providers::HashingEmbedder;

use theoria_core::config::EmbeddingConfig;
use theoria_core::errors::{EmbeddingError, TheoriaResult};
use theoria_core::traits::IEmbeddingService;

/// Build the service named by `config.provider`.
pub fn create_service(config: &EmbeddingConfig) -> TheoriaResult<Box<dyn IEmbeddingService>> {
    match config.provider.as_str() {
        providers::hashing::PROVIDER_NAME => {
            tracing::info!(
                provider = %config.provider,
                dimensions = ?config.dimensions,
                "embedding service ready"
            );
            Ok(Box::new(HashingEmbedder::new(config.dimensions)))
        }
        other => Err(EmbeddingError::ProviderUnavailable {
            provider: other.to_string(),
        }
        .into()),
    }
}
