use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Chunk plain-text files and embed each chunk.
///
/// Backend and chunking defaults come from the environment (and `.env`);
/// see `embedkit config` for the active values.
#[derive(Parser, Debug)]
#[command(name = "embedkit", version, about = "Chunk plain-text files and embed each chunk")]
pub struct CliArgs {
    /// Config profile; keys are looked up as {PROFILE}_{KEY} first
    #[arg(long, global = true, env = "EMBEDKIT_PROFILE")]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Split files into chunks and print one JSON line per chunk
    Extract(ExtractArgs),
    /// Print what the configured extractor accepts and produces
    Describe,
    /// Print the active configuration with secrets redacted
    Config,
}

#[derive(Args, Debug, Default)]
pub struct ExtractArgs {
    /// Files to read
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Maximum characters per chunk (0 = model context length)
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Characters shared between adjacent chunks
    #[arg(long)]
    pub overlap: Option<usize>,

    /// Splitting strategy: char or recursive
    #[arg(long)]
    pub splitter: Option<String>,

    /// MIME type for every file, instead of guessing from the extension
    #[arg(long)]
    pub content_type: Option<String>,
}
