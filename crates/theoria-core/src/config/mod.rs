pub mod defaults;
mod embedding_config;
mod observability_config;
mod retrieval_config;
mod storage_config;

pub use embedding_config::EmbeddingConfig;
pub use observability_config::ObservabilityConfig;
pub use retrieval_config::RetrievalConfig;
pub use storage_config::StorageConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, TheoriaResult};

/// Top-level configuration. Every section falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TheoriaConfig {
    pub storage: StorageConfig,
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
    pub observability: ObservabilityConfig,
}

impl TheoriaConfig {
    /// Parse a TOML document. Missing sections and fields keep their defaults.
    pub fn from_toml(source: &str) -> TheoriaResult<Self> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::InvalidToml {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> TheoriaResult<()> {
        let r = &self.retrieval;
        if r.default_k == 0 {
            return Err(invalid("retrieval.default_k", "must be at least 1"));
        }
        if r.candidate_multiplier == 0 {
            return Err(invalid("retrieval.candidate_multiplier", "must be at least 1"));
        }
        for (field, weight) in [
            ("retrieval.keyword_match_weight", r.keyword_match_weight),
            ("retrieval.fallback_osis_bonus", r.fallback_osis_bonus),
            ("retrieval.vector_weight", r.vector_weight),
            ("retrieval.lexical_weight", r.lexical_weight),
            ("retrieval.keyword_weight", r.keyword_weight),
            ("retrieval.native_osis_bonus", r.native_osis_bonus),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(invalid(field, "must be a finite, non-negative number"));
            }
        }
        if self.embedding.dimensions == Some(0) {
            return Err(invalid("embedding.dimensions", "must be omitted or positive"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> crate::errors::TheoriaError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
    .into()
}
