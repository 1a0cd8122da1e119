//! Feature-hashing embedder.
//!
//! Each lowercase word is hashed (FNV-1a) into one of `dimensions` buckets
//! with a hash-derived sign, weighted by sublinear term frequency, then the
//! vector is L2-normalized. Texts sharing words get positive cosine
//! similarity; text without words embeds to the zero vector.

use std::collections::HashMap;

use theoria_core::errors::{EmbeddingError, TheoriaResult};
use theoria_core::traits::IEmbeddingService;

pub const PROVIDER_NAME: &str = "hashing";

/// Deterministic hashing embedder. `dimensions = None` leaves the service
/// unconfigured: it reports no dimension and refuses to embed.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimensions: Option<usize>,
}

impl HashingEmbedder {
    pub fn new(dimensions: Option<usize>) -> Self {
        Self {
            dimensions: dimensions.filter(|d| *d > 0),
        }
    }

    fn fnv1a(term: &str) -> u64 {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        h
    }

    /// Embed one text into `dims` dimensions. `dims == 0` yields an empty vector.
    pub fn vector(&self, text: &str, dims: usize) -> Vec<f32> {
        if dims == 0 {
            return Vec::new();
        }
        let mut counts: HashMap<String, u32> = HashMap::new();
        for word in text
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|w| !w.is_empty())
        {
            *counts.entry(word.to_lowercase()).or_default() += 1;
        }

        let mut vec = vec![0.0f32; dims];
        for (term, count) in &counts {
            let h = Self::fnv1a(term);
            let bucket = (h % dims as u64) as usize;
            let sign = if h >> 63 == 0 { 1.0 } else { -1.0 };
            vec[bucket] += sign * (1.0 + (*count as f32).ln());
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

impl IEmbeddingService for HashingEmbedder {
    fn embed(&self, texts: &[String]) -> TheoriaResult<Vec<Vec<f32>>> {
        let Some(dims) = self.dimensions else {
            return Err(EmbeddingError::ProviderUnavailable {
                provider: format!("{PROVIDER_NAME} (no dimensions configured)"),
            }
            .into());
        };
        Ok(texts.iter().map(|t| self.vector(t, dims)).collect())
    }

    fn dimensions(&self) -> Option<usize> {
        self.dimensions
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embed_one(e: &HashingEmbedder, text: &str) -> Vec<f32> {
        e.embed(&[text.to_string()]).unwrap().remove(0)
    }

    fn cosine(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn zero_dimensions_yield_an_empty_vector() {
        let e = HashingEmbedder::new(Some(8));
        assert!(e.vector("grace and peace", 0).is_empty());
    }

    #[test]
    fn wordless_text_is_zero_vector() {
        let e = HashingEmbedder::new(Some(64));
        let v = embed_one(&e, "  ... ");
        assert_eq!(v.len(), 64);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn output_is_unit_length() {
        let e = HashingEmbedder::new(Some(256));
        let v = embed_one(&e, "justification by faith alone");
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "expected unit norm, got {norm}");
    }

    #[test]
    fn case_and_punctuation_do_not_matter() {
        let e = HashingEmbedder::new(Some(128));
        assert_eq!(embed_one(&e, "Grace, Peace!"), embed_one(&e, "grace peace"));
    }

    #[test]
    fn shared_words_raise_similarity() {
        let e = HashingEmbedder::new(Some(512));
        let a = embed_one(&e, "grace and mercy");
        let b = embed_one(&e, "grace and peace");
        let identical = cosine(&a, &a);
        assert!((identical - 1.0).abs() < 1e-5);
        assert!(cosine(&a, &b) > 0.0);
    }

    #[test]
    fn one_vector_per_text() {
        let e = HashingEmbedder::new(Some(32));
        let out = e.embed(&["a".into(), "b".into(), "c".into()]).unwrap();
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn unconfigured_refuses_to_embed() {
        let e = HashingEmbedder::new(None);
        assert_eq!(e.dimensions(), None);
        assert!(e.embed(&["grace".into()]).is_err());
        assert_eq!(HashingEmbedder::new(Some(0)).dimensions(), None);
    }
}
