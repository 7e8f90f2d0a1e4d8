//! Adaptive hierarchical chunking of markdown documents for embedding search
//!
//! This crate turns long-form markdown into overlapping, semantically
//! coherent chunks sized for a token-limited embedding model. Text is cut at
//! the coarsest structural boundary that works (headings, then paragraphs,
//! then sentences, with a word-boundary hard cut as last resort), greedily
//! packed toward a token budget, given trailing-context overlap, and emitted
//! as stable, addressable records with linkage and provenance metadata.
//!
//! ```
//! use semchunk_core::chunk_text;
//!
//! let chunks = chunk_text("# Hello\n\nSome content.", "Hello", "hello").unwrap();
//! assert_eq!(chunks[0].id, "post:hello::ch0");
//! ```
//!
//! Embedding-vector generation, file discovery, and persistence are external
//! collaborators; see the `semchunk` CLI for the reference orchestration.

#![warn(missing_docs)]

mod assembler;
mod decompose;
mod markdown;
mod outline;
mod overlap;
mod packer;
mod splitter;

pub mod chunk;
pub mod config;
pub mod document;
pub mod error;
pub mod processor;
pub mod token;

pub use chunk::{CharOffsets, Chunk, Link};
pub use config::{ChunkConfig, ChunkConfigBuilder, OverlapPolicy, StructureProfile};
pub use document::{Document, DocumentMeta};
pub use error::{ChunkError, Result};
pub use processor::ChunkProcessor;
pub use token::TokenCounter;

/// Chunk a markdown string with the default configuration.
pub fn chunk_text(text: &str, title: &str, slug: &str) -> Result<Vec<Chunk>> {
    ChunkProcessor::new().process_text(text, title, slug)
}

/// Chunk a document with the default configuration.
pub fn chunk_document(document: &Document) -> Result<Vec<Chunk>> {
    ChunkProcessor::new().process(document)
}
