//! Chunk-and-embed extractor.
//!
//! Splits every plain-text input into chunks, asks the configured
//! [`Embedder`] for one vector per chunk and returns each chunk as new
//! content carrying its embedding feature. Inputs of any other MIME type
//! are skipped and get no output entry at all.

use std::sync::Arc;

use async_trait::async_trait;
use embedkit_core::{
    Content, EmbeddingSchema, ExtractError, Extractor, ExtractorDescription, Feature,
    DEFAULT_EMBEDDING_NAME,
};
use tracing::debug;

use crate::embedding::Embedder;
use crate::params::EmbeddingInputParams;

pub struct EmbeddingExtractor {
    max_context_length: usize,
    embedder: Arc<dyn Embedder>,
    name: String,
}

impl EmbeddingExtractor {
    /// `max_context_length` is the chunk size used when params leave it at 0.
    pub fn new(max_context_length: usize, embedder: Arc<dyn Embedder>) -> Result<Self, ExtractError> {
        if max_context_length == 0 {
            return Err(ExtractError::UnsupportedConfig(
                "max context length must be greater than zero".into(),
            ));
        }
        let name = format!("embedding/{}", embedder.name());
        Ok(Self {
            max_context_length,
            embedder,
            name,
        })
    }

    pub fn max_context_length(&self) -> usize {
        self.max_context_length
    }

    pub fn embedder(&self) -> &Arc<dyn Embedder> {
        &self.embedder
    }

    /// Embed one list of chunks and pair every chunk with its vector.
    async fn embed_chunks(&self, chunks: Vec<String>) -> Result<Vec<Content>, ExtractError> {
        if chunks.is_empty() {
            return Ok(Vec::new());
        }

        let texts: Vec<&str> = chunks.iter().map(String::as_str).collect();
        let embeddings = self.embedder.extract_embeddings(&texts).await?;
        if embeddings.len() != chunks.len() {
            return Err(ExtractError::EmbeddingCountMismatch {
                expected: chunks.len(),
                actual: embeddings.len(),
            });
        }

        let distance = self.embedder.distance();
        Ok(chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, values)| {
                Content::from_text(
                    chunk,
                    Feature::named_embedding(DEFAULT_EMBEDDING_NAME, values, distance),
                )
            })
            .collect())
    }
}

#[async_trait]
impl Extractor for EmbeddingExtractor {
    type Params = EmbeddingInputParams;

    fn name(&self) -> &str {
        &self.name
    }

    fn describe(&self) -> ExtractorDescription {
        ExtractorDescription {
            name: self.name.clone(),
            input_mime_types: self.input_mime_types(),
            embedding: Some(EmbeddingSchema {
                name: DEFAULT_EMBEDDING_NAME.to_string(),
                dimensions: self.embedder.dimensions(),
                distance: self.embedder.distance(),
            }),
        }
    }

    async fn extract(
        &self,
        content: &[Content],
        params: &EmbeddingInputParams,
    ) -> Result<Vec<Vec<Content>>, ExtractError> {
        let resolved = params.resolve(self.max_context_length)?;
        let splitter = resolved.splitter()?;
        debug!(
            extractor = %self.name,
            items = content.len(),
            chunk_size = resolved.chunk_size,
            overlap = resolved.overlap,
            splitter = %resolved.text_splitter,
            "extracting embeddings"
        );

        let mut extracted = Vec::new();
        for (index, item) in content.iter().enumerate() {
            if !item.is_plain_text() {
                debug!(index, content_type = %item.content_type, "skipping non-text content");
                continue;
            }

            let text = item
                .text()
                .map_err(|source| ExtractError::Decode { index, source })?;
            let chunks = splitter.split(text);
            debug!(index, chunks = chunks.len(), "split content");

            extracted.push(self.embed_chunks(chunks).await?);
        }
        Ok(extracted)
    }
}
