use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use embedkit_core::config::ChunkingConfig;
use embedkit_core::{Config, Content, Extractor};
use embedkit_ingest::{build_embedder, EmbeddingExtractor, EmbeddingInputParams};

/// Extensions read as `text/plain`.
const TEXT_EXTENSIONS: &[&str] = &["txt", "text", "md", "markdown", "rst", "log", "csv"];

/// One output line of `embedkit extract`.
#[derive(Debug, Serialize)]
struct ChunkRecord<'a> {
    source: &'a str,
    chunk_index: usize,
    text: &'a str,
    embedding: &'a [f32],
}

pub fn guess_content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if TEXT_EXTENSIONS.contains(&ext.as_str()) {
        "text/plain"
    } else {
        "application/octet-stream"
    }
}

/// CLI flags win over the `chunking` section of the config.
pub fn build_params(
    args: &crate::cli::ExtractArgs,
    defaults: &ChunkingConfig,
) -> Result<EmbeddingInputParams> {
    let splitter = args.splitter.as_deref().unwrap_or(&defaults.text_splitter);
    let params = EmbeddingInputParams::new(
        args.chunk_size.unwrap_or(defaults.chunk_size),
        args.overlap.unwrap_or(defaults.overlap),
        splitter,
    )?;
    Ok(params)
}

pub fn build_extractor(config: &Config) -> Result<EmbeddingExtractor> {
    let embedder = build_embedder(config).context("failed to create embedding backend")?;
    let extractor = EmbeddingExtractor::new(config.embedding.max_context_length, embedder)?;
    Ok(extractor)
}

pub async fn run_extract(
    config: &Config,
    args: &crate::cli::ExtractArgs,
    out: &mut impl Write,
) -> Result<()> {
    let params = build_params(args, &config.chunking)?;
    let extractor = build_extractor(config)?;

    let mut sources = Vec::with_capacity(args.files.len());
    let mut contents = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let data = std::fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let content_type = args
            .content_type
            .clone()
            .unwrap_or_else(|| guess_content_type(path).to_string());
        let content = Content::new(content_type, data);
        if !content.is_plain_text() {
            warn!(file = %path.display(), content_type = %content.content_type, "skipping non-text file");
        }
        sources.push(path.display().to_string());
        contents.push(content);
    }

    let extracted = extractor
        .extract(&contents, &params)
        .await
        .context("extraction failed")?;

    // The extractor emits one entry per plain-text input, in input order.
    let processed = sources
        .iter()
        .zip(&contents)
        .filter(|(_, content)| content.is_plain_text())
        .map(|(source, _)| source.as_str());

    let mut written = 0usize;
    for (source, chunks) in processed.zip(&extracted) {
        for (chunk_index, chunk) in chunks.iter().enumerate() {
            let record = ChunkRecord {
                source,
                chunk_index,
                text: chunk.text().unwrap_or_default(),
                embedding: chunk.embedding().unwrap_or_default(),
            };
            serde_json::to_writer(&mut *out, &record)?;
            writeln!(out)?;
            written += 1;
        }
    }

    info!(files = args.files.len(), chunks = written, "extraction complete");
    Ok(())
}

pub fn run_describe(config: &Config, out: &mut impl Write) -> Result<()> {
    let extractor = build_extractor(config)?;
    serde_json::to_writer_pretty(&mut *out, &extractor.describe())?;
    writeln!(out)?;
    Ok(())
}

pub fn run_config(config: &Config, out: &mut impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, &config.redacted_summary())?;
    writeln!(out)?;
    Ok(())
}
