use std::num::NonZeroUsize;
use std::sync::Arc;

use async_trait::async_trait;
use embedkit_core::Distance;
use lru::LruCache;
use tokio::sync::Mutex;
use tracing::debug;

use super::traits::{Embedder, EmbeddingError};

/// LRU cache mapping text to embedding vector.
pub struct EmbeddingCache {
    cache: LruCache<String, Vec<f32>>,
    hits: u64,
    misses: u64,
}

impl EmbeddingCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: LruCache::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)),
            hits: 0,
            misses: 0,
        }
    }

    /// Look up a cached embedding by text.
    pub fn get(&mut self, text: &str) -> Option<Vec<f32>> {
        if let Some(vec) = self.cache.get(text) {
            self.hits += 1;
            Some(vec.clone())
        } else {
            self.misses += 1;
            None
        }
    }

    /// Store an embedding for a text.
    pub fn put(&mut self, text: &str, embedding: Vec<f32>) {
        self.cache.put(text.to_string(), embedding);
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

/// Snapshot of a `CachedEmbedder`'s counters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
    pub hit_rate: f64,
}

/// Embedder that answers repeated texts from an LRU cache and forwards only
/// the misses to the wrapped backend, in one call.
pub struct CachedEmbedder {
    inner: Arc<dyn Embedder>,
    cache: Mutex<EmbeddingCache>,
}

impl CachedEmbedder {
    pub fn new(inner: Arc<dyn Embedder>, capacity: usize) -> Self {
        Self {
            inner,
            cache: Mutex::new(EmbeddingCache::new(capacity)),
        }
    }

    pub async fn stats(&self) -> CacheStats {
        let cache = self.cache.lock().await;
        CacheStats {
            hits: cache.hits(),
            misses: cache.misses(),
            entries: cache.len(),
            hit_rate: cache.hit_rate(),
        }
    }
}

#[async_trait]
impl Embedder for CachedEmbedder {
    async fn extract_embeddings(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut vectors: Vec<Option<Vec<f32>>> = Vec::with_capacity(texts.len());
        let mut missing: Vec<(usize, &str)> = Vec::new();
        {
            let mut cache = self.cache.lock().await;
            for (i, &text) in texts.iter().enumerate() {
                let hit = cache.get(text);
                if hit.is_none() {
                    missing.push((i, text));
                }
                vectors.push(hit);
            }
        }

        if !missing.is_empty() {
            debug!(
                backend = self.inner.name(),
                hits = texts.len() - missing.len(),
                misses = missing.len(),
                "embedding cache lookup"
            );
            // The lock is released while the backend runs.
            let miss_texts: Vec<&str> = missing.iter().map(|(_, t)| *t).collect();
            let fetched = self.inner.extract_embeddings(&miss_texts).await?;
            if fetched.len() != missing.len() {
                return Err(EmbeddingError::CountMismatch {
                    expected: missing.len(),
                    actual: fetched.len(),
                });
            }

            let mut cache = self.cache.lock().await;
            for ((i, text), vector) in missing.into_iter().zip(fetched) {
                cache.put(text, vector.clone());
                vectors[i] = Some(vector);
            }
        }

        Ok(vectors.into_iter().flatten().collect())
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn distance(&self) -> Distance {
        self.inner.distance()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
