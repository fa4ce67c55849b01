pub mod cache;
pub mod factory;
pub mod hash;
mod http;
pub mod ollama;
pub mod openai;
pub mod traits;

pub use cache::{CacheStats, CachedEmbedder, EmbeddingCache};
pub use factory::build_embedder;
pub use hash::HashEmbedder;
pub use ollama::OllamaEmbedder;
pub use openai::OpenAiEmbedder;
pub use traits::{Embedder, EmbeddingError};
