use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub embedding: EmbeddingConfig,
    pub ollama: OllamaConfig,
    pub openai: OpenAiConfig,
    pub chunking: ChunkingConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `EMBEDKIT_PROFILE` env var. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("EMBEDKIT_PROFILE", "");
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            embedding: EmbeddingConfig::from_env_profiled(p),
            ollama: OllamaConfig::from_env_profiled(p),
            openai: OpenAiConfig::from_env_profiled(p),
            chunking: ChunkingConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  embedding:   provider={}, dims={}, max_context={}, cache={}",
            self.embedding.provider,
            self.embedding.dimensions,
            self.embedding.max_context_length,
            self.embedding.cache_capacity
        );
        tracing::info!("  ollama:      url={}, model={}", self.ollama.url, self.ollama.embedding_model);
        tracing::info!(
            "  openai:      model={}, key={}",
            self.openai.model,
            if self.openai.is_configured() { "set" } else { "(none)" }
        );
        tracing::info!(
            "  chunking:    size={}, overlap={}, splitter={}",
            self.chunking.chunk_size,
            self.chunking.overlap,
            self.chunking.text_splitter
        );
    }

    /// Return a redacted view safe to print (no secrets).
    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "embedding": {
                "provider": self.embedding.provider,
                "dimensions": self.embedding.dimensions,
                "max_context_length": self.embedding.max_context_length,
                "cache_capacity": self.embedding.cache_capacity,
            },
            "ollama": { "url": self.ollama.url, "embedding_model": self.ollama.embedding_model },
            "openai": {
                "model": self.openai.model,
                "base_url": self.openai.base_url,
                "configured": self.openai.is_configured(),
            },
            "chunking": {
                "chunk_size": self.chunking.chunk_size,
                "overlap": self.chunking.overlap,
                "text_splitter": self.chunking.text_splitter,
            },
        })
    }
}

// ── Embedding ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// "hash", "ollama", "openai"
    pub provider: String,
    pub dimensions: usize,
    /// Longest input the model accepts; used when params leave chunk_size at 0.
    pub max_context_length: usize,
    /// LRU entries kept in front of the backend (0 = no cache).
    pub cache_capacity: usize,
}

impl EmbeddingConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            provider: profiled_env_or(p, "EMBEDDING_PROVIDER", "hash"),
            dimensions: profiled_env_usize(p, "EMBEDDING_DIMENSIONS", 384),
            max_context_length: profiled_env_usize(p, "EMBEDDING_MAX_CONTEXT", 512),
            cache_capacity: profiled_env_usize(p, "EMBEDDING_CACHE_CAPACITY", 0),
        }
    }
}

// ── Ollama (local models) ─────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    pub url: String,
    pub embedding_model: String,
}

impl OllamaConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            url: profiled_env_or(p, "OLLAMA_URL", "http://localhost:11434"),
            embedding_model: profiled_env_or(p, "OLLAMA_EMBEDDING_MODEL", "nomic-embed-text"),
        }
    }
}

// ── OpenAI-compatible API ─────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: Option<String>,
}

impl OpenAiConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            api_key: profiled_env_opt(p, "OPENAI_API_KEY"),
            model: profiled_env_or(p, "OPENAI_EMBEDDING_MODEL", "text-embedding-3-small"),
            base_url: profiled_env_opt(p, "OPENAI_BASE_URL"),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

// ── Chunking defaults ─────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// 0 = use the model's max context length.
    pub chunk_size: usize,
    pub overlap: usize,
    /// "char" or "recursive"; validated when params are built.
    pub text_splitter: String,
}

impl ChunkingConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            chunk_size: profiled_env_usize(p, "CHUNK_SIZE", 0),
            overlap: profiled_env_usize(p, "CHUNK_OVERLAP", 0),
            text_splitter: profiled_env_or(p, "TEXT_SPLITTER", "recursive"),
        }
    }
}
