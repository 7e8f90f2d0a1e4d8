//! Configuration for the chunking pipeline

use serde::{Deserialize, Serialize};

use crate::error::{ChunkError, Result};
use crate::processor::ChunkProcessor;

/// Splitter chain selection by corpus structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureProfile {
    /// Heading, paragraph, then sentence boundaries
    #[default]
    Markdown,
    /// Paragraph, then sentence boundaries
    Plain,
    /// Symbol definitions, paragraph, then sentence boundaries
    Code,
}

/// How trailing context is carried across chunk boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapPolicy {
    /// No overlap between chunks
    None,
    /// Prepend the last `n` sentences of the previous chunk
    Sentences(usize),
    /// Prepend roughly `n` tokens of trailing text from the previous chunk
    Tokens(usize),
}

/// Configuration for the chunking pipeline
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// Maximum tokens per chunk
    pub max_chunk_tokens: usize,
    /// Minimum tokens per chunk; smaller chunks are merged where possible
    pub min_chunk_tokens: usize,
    /// Overlap carried from each chunk into its successor
    pub overlap: OverlapPolicy,
    /// Splitter chain to use
    pub structure_profile: StructureProfile,
    /// Id namespace for produced chunks (`<content_type>:<slug>::ch<N>`)
    pub content_type: String,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_chunk_tokens: 625,
            min_chunk_tokens: 50,
            overlap: OverlapPolicy::Tokens(100),
            structure_profile: StructureProfile::Markdown,
            content_type: "post".to_string(),
        }
    }
}

impl ChunkConfig {
    /// Profile tuned for long prose: larger chunks, sentence overlap.
    pub fn prose() -> Self {
        Self {
            max_chunk_tokens: 800,
            min_chunk_tokens: 400,
            overlap: OverlapPolicy::Sentences(1),
            ..Self::default()
        }
    }

    /// Create a builder.
    pub fn builder() -> ChunkConfigBuilder {
        ChunkConfigBuilder::default()
    }
}

/// Builder for [`ChunkConfig`]
#[derive(Debug, Default)]
pub struct ChunkConfigBuilder {
    config: ChunkConfig,
}

impl ChunkConfigBuilder {
    /// Set the maximum tokens per chunk.
    pub fn max_chunk_tokens(mut self, max: usize) -> Self {
        self.config.max_chunk_tokens = max;
        self
    }

    /// Set the minimum tokens per chunk.
    pub fn min_chunk_tokens(mut self, min: usize) -> Self {
        self.config.min_chunk_tokens = min;
        self
    }

    /// Set the overlap policy.
    pub fn overlap(mut self, overlap: OverlapPolicy) -> Self {
        self.config.overlap = overlap;
        self
    }

    /// Set the structure profile.
    pub fn structure_profile(mut self, profile: StructureProfile) -> Self {
        self.config.structure_profile = profile;
        self
    }

    /// Set the content type used in chunk ids.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.config.content_type = content_type.into();
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<ChunkConfig> {
        if self.config.max_chunk_tokens == 0 {
            return Err(ChunkError::InvalidConfig(
                "max_chunk_tokens must be nonzero".to_string(),
            ));
        }
        if self.config.min_chunk_tokens >= self.config.max_chunk_tokens {
            return Err(ChunkError::InvalidConfig(format!(
                "min_chunk_tokens ({}) must be below max_chunk_tokens ({})",
                self.config.min_chunk_tokens, self.config.max_chunk_tokens
            )));
        }
        if self.config.content_type.trim().is_empty() {
            return Err(ChunkError::InvalidConfig(
                "content_type must be nonempty".to_string(),
            ));
        }
        Ok(self.config)
    }

    /// Build a processor directly from this configuration.
    pub fn build_processor(self) -> Result<ChunkProcessor> {
        Ok(ChunkProcessor::with_config(self.build()?))
    }
}
