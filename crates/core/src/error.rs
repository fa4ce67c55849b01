use std::str::Utf8Error;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Unsupported configuration: {0}")]
    UnsupportedConfig(String),

    #[error("Invalid extractor params: {0}")]
    InvalidParams(#[from] serde_json::Error),

    #[error("Content #{index} is labelled text/plain but is not valid UTF-8: {source}")]
    Decode {
        index: usize,
        #[source]
        source: Utf8Error,
    },

    #[error("Embedder returned {actual} vectors for {expected} chunks")]
    EmbeddingCountMismatch { expected: usize, actual: usize },

    #[error("Embedding backend error: {0}")]
    Backend(String),
}
