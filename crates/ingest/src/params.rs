//! Chunking options accepted by the embedding extractor.

use embedkit_core::ExtractError;
use serde::{Deserialize, Serialize};

use crate::splitter::{TextSplitter, TextSplitterKind};

/// Input params of the embedding extractor.
///
/// All fields are optional in JSON: `{}` means "recursive splitter, no
/// overlap, chunks as long as the model's context". An unknown
/// `text_splitter` is rejected when the value is built or deserialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingInputParams {
    chunk_size: usize,
    overlap: usize,
    text_splitter: TextSplitterKind,
}

impl EmbeddingInputParams {
    pub fn new(chunk_size: usize, overlap: usize, text_splitter: &str) -> Result<Self, ExtractError> {
        Ok(Self {
            chunk_size,
            overlap,
            text_splitter: text_splitter.parse()?,
        })
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_overlap(mut self, overlap: usize) -> Self {
        self.overlap = overlap;
        self
    }

    pub fn with_text_splitter(mut self, text_splitter: TextSplitterKind) -> Self {
        self.text_splitter = text_splitter;
        self
    }

    /// Requested chunk size; 0 means "use the model's context length".
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    pub fn text_splitter(&self) -> TextSplitterKind {
        self.text_splitter
    }

    /// Fill in the default chunk size for one extraction call.
    pub fn resolve(&self, max_context_length: usize) -> Result<ResolvedParams, ExtractError> {
        let chunk_size = if self.chunk_size == 0 {
            max_context_length
        } else {
            self.chunk_size
        };
        if self.overlap > chunk_size {
            return Err(ExtractError::UnsupportedConfig(format!(
                "overlap ({}) is larger than chunk_size ({chunk_size})",
                self.overlap
            )));
        }
        Ok(ResolvedParams {
            chunk_size,
            overlap: self.overlap,
            text_splitter: self.text_splitter,
        })
    }
}

/// Params with the chunk size defaulted, ready to build a splitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedParams {
    pub chunk_size: usize,
    pub overlap: usize,
    pub text_splitter: TextSplitterKind,
}

impl ResolvedParams {
    pub fn splitter(&self) -> Result<TextSplitter, ExtractError> {
        TextSplitter::new(self.text_splitter, self.chunk_size, self.overlap)
    }
}
