//! Configuration file support
//!
//! A TOML file mirrors the core's `ChunkConfig` plus output and performance
//! settings; command-line flags override individual fields.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use semchunk_core::{ChunkConfig, OverlapPolicy, StructureProfile};
use serde::{Deserialize, Serialize};

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CliConfig {
    /// Chunking parameters
    pub chunking: ChunkingConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Performance settings
    pub performance: PerformanceConfig,
}

/// Chunking-related configuration
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Maximum tokens per chunk
    pub max_chunk_tokens: usize,

    /// Minimum tokens per chunk
    pub min_chunk_tokens: usize,

    /// Tokens of trailing overlap; ignored when `overlap_sentences` is set
    pub overlap_tokens: Option<usize>,

    /// Sentences of trailing overlap; takes precedence over `overlap_tokens`
    pub overlap_sentences: Option<usize>,

    /// Splitter chain: markdown, plain, or code
    pub structure_profile: StructureProfile,

    /// Id namespace for produced chunks
    pub content_type: String,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chunk_tokens: 625,
            min_chunk_tokens: 50,
            overlap_tokens: Some(100),
            overlap_sentences: None,
            structure_profile: StructureProfile::Markdown,
            content_type: "post".to_string(),
        }
    }
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory chunk files are written into
    pub directory: PathBuf,

    /// Pretty-print the JSON records
    pub pretty: bool,

    /// Remove stale chunk files for the content type before writing
    pub clean_existing: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("chunks"),
            pretty: true,
            clean_existing: true,
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Process documents in parallel
    pub parallel: bool,

    /// Worker threads for parallel processing (default: all cores)
    pub threads: Option<usize>,
}

impl CliConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Translate into the core's chunking configuration.
    pub fn to_chunk_config(&self) -> Result<ChunkConfig> {
        let overlap = match (
            self.chunking.overlap_sentences,
            self.chunking.overlap_tokens,
        ) {
            (Some(n), _) if n > 0 => OverlapPolicy::Sentences(n),
            (Some(_), _) => OverlapPolicy::None,
            (None, Some(n)) if n > 0 => OverlapPolicy::Tokens(n),
            (None, _) => OverlapPolicy::None,
        };

        let config = ChunkConfig::builder()
            .max_chunk_tokens(self.chunking.max_chunk_tokens)
            .min_chunk_tokens(self.chunking.min_chunk_tokens)
            .overlap(overlap)
            .structure_profile(self.chunking.structure_profile)
            .content_type(self.chunking.content_type.clone())
            .build()?;
        Ok(config)
    }

    /// The default configuration rendered as TOML.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).expect("default config serializes")
    }
}
