//! Error types for the chunking core
//!
//! Local recoveries (heuristic tokenizer fallback, hard cuts, offset
//! confidence degradation) are not errors; only conditions that make a
//! document unprocessable surface here.

use thiserror::Error;

/// Errors produced by the chunking core
#[derive(Error, Debug)]
pub enum ChunkError {
    /// Document metadata required to mint chunk ids is missing
    #[error("document '{document}' is missing required metadata field '{field}'")]
    MissingMetadata {
        /// Human-readable name of the offending document (path, slug, or title)
        document: String,
        /// The metadata field that was absent or empty
        field: &'static str,
    },

    /// Configuration rejected at build time
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for chunking operations
pub type Result<T> = std::result::Result<T, ChunkError>;
