use std::sync::Arc;

use embedkit_core::{Config, ExtractError};
use tracing::info;

use super::cache::CachedEmbedder;
use super::hash::HashEmbedder;
use super::ollama::OllamaEmbedder;
use super::openai::OpenAiEmbedder;
use super::traits::Embedder;

/// Build an Embedder from config, wrapped in an LRU cache when
/// `embedding.cache_capacity` is non-zero.
pub fn build_embedder(config: &Config) -> Result<Arc<dyn Embedder>, ExtractError> {
    let dimensions = config.embedding.dimensions;
    if dimensions == 0 {
        return Err(ExtractError::UnsupportedConfig(
            "EMBEDDING_DIMENSIONS must be greater than zero".into(),
        ));
    }

    let embedder: Arc<dyn Embedder> = match config.embedding.provider.as_str() {
        "hash" => {
            info!("Embedding provider ready: hash (dims: {})", dimensions);
            Arc::new(HashEmbedder::new(dimensions))
        }
        "ollama" => {
            info!(
                "Embedding provider ready: ollama (model: {}, dims: {})",
                config.ollama.embedding_model, dimensions
            );
            Arc::new(OllamaEmbedder::new(
                config.ollama.url.clone(),
                config.ollama.embedding_model.clone(),
                dimensions,
            ))
        }
        "openai" => {
            let Some(api_key) = config.openai.api_key.clone() else {
                return Err(ExtractError::UnsupportedConfig(
                    "EMBEDDING_PROVIDER=openai but OPENAI_API_KEY is empty".into(),
                ));
            };
            info!(
                "Embedding provider ready: openai (model: {}, dims: {})",
                config.openai.model, dimensions
            );
            Arc::new(OpenAiEmbedder::new(
                api_key,
                config.openai.model.clone(),
                config.openai.base_url.clone(),
                dimensions,
            ))
        }
        other => {
            return Err(ExtractError::UnsupportedConfig(format!(
                "unknown embedding provider '{other}' (expected hash, ollama or openai)"
            )));
        }
    };

    if config.embedding.cache_capacity > 0 {
        info!("Embedding cache enabled ({} entries)", config.embedding.cache_capacity);
        return Ok(Arc::new(CachedEmbedder::new(
            embedder,
            config.embedding.cache_capacity,
        )));
    }
    Ok(embedder)
}
