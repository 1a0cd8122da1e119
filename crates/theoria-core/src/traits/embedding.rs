use crate::errors::TheoriaResult;

/// Embedding generation service.
pub trait IEmbeddingService: Send + Sync {
    /// Embed a batch of texts, one vector per text.
    fn embed(&self, texts: &[String]) -> TheoriaResult<Vec<Vec<f32>>>;

    /// The dimensionality of produced vectors, `None` when unconfigured.
    fn dimensions(&self) -> Option<usize>;

    /// Human-readable provider name.
    fn name(&self) -> &str;
}
