use async_trait::async_trait;
use embedkit_core::{Distance, ExtractError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Backend returned {actual} vectors for {expected} texts")]
    CountMismatch { expected: usize, actual: usize },
}

impl From<EmbeddingError> for ExtractError {
    fn from(err: EmbeddingError) -> Self {
        match err {
            EmbeddingError::CountMismatch { expected, actual } => {
                ExtractError::EmbeddingCountMismatch { expected, actual }
            }
            other => ExtractError::Backend(other.to_string()),
        }
    }
}

/// Trait for embedding backends (hashing, Ollama, OpenAI, cached, ...).
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts, returning one vector per input text (in order).
    async fn extract_embeddings(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// The dimensionality of the output vectors.
    fn dimensions(&self) -> usize;

    /// Metric the vectors are meant to be compared with.
    fn distance(&self) -> Distance {
        Distance::Cosine
    }

    /// Short backend label for logs and extractor names.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_mismatch_keeps_its_meaning() {
        let err: ExtractError = EmbeddingError::CountMismatch { expected: 3, actual: 1 }.into();
        assert!(matches!(
            err,
            ExtractError::EmbeddingCountMismatch { expected: 3, actual: 1 }
        ));
    }

    #[test]
    fn other_errors_become_backend_errors() {
        let err: ExtractError = EmbeddingError::Api("503: overloaded".into()).into();
        assert!(matches!(err, ExtractError::Backend(ref msg) if msg.contains("overloaded")));

        let err: ExtractError = EmbeddingError::DimensionMismatch { expected: 4, actual: 2 }.into();
        assert!(matches!(err, ExtractError::Backend(ref msg) if msg.contains("expected 4")));
    }
}
