//! Local, offline embedder based on feature hashing.
//!
//! Each lowercase alphanumeric token is hashed with SHA-256 into one of
//! `dimensions` buckets with a sign taken from the hash, and the result is
//! L2-normalised. The hash is fixed, so vectors do not change between builds.
//! Texts sharing words land close together under cosine similarity, which
//! is enough for offline runs and tests without a model server.

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use super::traits::{Embedder, EmbeddingError};

#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimensions: usize,
}

impl HashEmbedder {
    /// `dimensions` is clamped to at least 1.
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];

        for token in text.split(|c: char| !c.is_alphanumeric()).filter(|t| !t.is_empty()) {
            let hash = token_hash(&token.to_lowercase());

            let bucket = (hash % self.dimensions as u64) as usize;
            let sign = if hash >> 63 == 1 { -1.0 } else { 1.0 };
            vector[bucket] += sign;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

fn token_hash(token: &str) -> u64 {
    let digest = Sha256::digest(token.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

#[async_trait]
impl Embedder for HashEmbedder {
    async fn extract_embeddings(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hash"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cosine(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[tokio::test]
    async fn same_text_same_vector() {
        let embedder = HashEmbedder::new(64);
        let v = embedder
            .extract_embeddings(&["Rust is fast", "rust IS fast!"])
            .await
            .unwrap();
        assert_eq!(v.len(), 2);
        assert_eq!(v[0].len(), 64);
        assert_eq!(v[0], v[1]);
    }

    #[tokio::test]
    async fn vectors_are_pinned() {
        let embedder = HashEmbedder::new(8);
        let v = embedder.extract_embeddings(&["Rust, fast"]).await.unwrap();
        let half = std::f32::consts::FRAC_1_SQRT_2;
        let expected = [0.0, -half, half, 0.0, 0.0, 0.0, 0.0, 0.0];
        for (got, want) in v[0].iter().zip(expected) {
            assert!((got - want).abs() < 1e-6, "{:?}", v[0]);
        }
    }

    #[tokio::test]
    async fn vectors_are_unit_length() {
        let embedder = HashEmbedder::new(32);
        let v = embedder.extract_embeddings(&["a few words here"]).await.unwrap();
        let norm = cosine(&v[0], &v[0]).sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn shared_words_score_higher() {
        let embedder = HashEmbedder::new(256);
        let v = embedder
            .extract_embeddings(&[
                "vector databases store embeddings",
                "embeddings live in vector databases",
                "the weather is sunny today",
            ])
            .await
            .unwrap();
        assert!(cosine(&v[0], &v[1]) > cosine(&v[0], &v[2]));
    }

    #[tokio::test]
    async fn empty_text_is_zero_vector() {
        let embedder = HashEmbedder::new(8);
        let v = embedder.extract_embeddings(&[""]).await.unwrap();
        assert!(v[0].iter().all(|x| *x == 0.0));
    }

    #[test]
    fn zero_dimensions_clamped() {
        assert_eq!(HashEmbedder::new(0).dimensions(), 1);
    }
}
