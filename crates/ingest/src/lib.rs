//! Chunking and embedding of plain-text content.
//!
//! [`EmbeddingExtractor`] ties the pieces together: [`splitter`] cuts text
//! into chunks, an [`embedding::Embedder`] backend turns chunks into vectors.

pub mod embedding;
pub mod extractor;
pub mod params;
pub mod splitter;

pub use embedding::{build_embedder, Embedder, EmbeddingError};
pub use extractor::EmbeddingExtractor;
pub use params::{EmbeddingInputParams, ResolvedParams};
pub use splitter::{TextSplitter, TextSplitterKind};
