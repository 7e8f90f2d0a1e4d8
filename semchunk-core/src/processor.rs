//! Pipeline entry point
//!
//! Wires the stages together: decompose -> drop filler -> pack -> overlap ->
//! assemble. Within one document the stages are strictly sequential (packing
//! depends on running token totals); across documents the processor is freely
//! shareable between threads.

use crate::assembler::Assembler;
use crate::chunk::Chunk;
use crate::config::ChunkConfig;
use crate::decompose::decompose;
use crate::document::{Document, DocumentMeta};
use crate::error::{ChunkError, Result};
use crate::markdown;
use crate::overlap;
use crate::packer::pack;
use crate::splitter::{chain_for, Splitter};
use crate::token::TokenCounter;

/// Chunking pipeline for markdown documents
///
/// Construct once per configuration and reuse across documents; the processor
/// holds no per-document state.
pub struct ChunkProcessor {
    config: ChunkConfig,
    counter: TokenCounter,
    chain: Vec<Box<dyn Splitter>>,
}

impl ChunkProcessor {
    /// Create a processor with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ChunkConfig::default())
    }

    /// Create a processor with a custom configuration.
    pub fn with_config(config: ChunkConfig) -> Self {
        Self::with_counter(config, TokenCounter::new())
    }

    /// Create a processor with an explicit token counter.
    ///
    /// The same counter drives splitting, packing, and the reported
    /// `token_count` of every chunk.
    pub fn with_counter(config: ChunkConfig, counter: TokenCounter) -> Self {
        let chain = chain_for(config.structure_profile);
        Self {
            config,
            counter,
            chain,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Chunk one document into ordered, linked chunk records.
    ///
    /// An empty or all-whitespace document yields zero chunks, not an error.
    /// Missing `title` or `slug` is an error naming the document, since no
    /// stable chunk id can be minted without them.
    pub fn process(&self, document: &Document) -> Result<Vec<Chunk>> {
        let meta = &document.meta;
        self.require_meta(meta)?;

        let text = document.text.as_str();
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let pieces = decompose(text, &self.chain, &self.counter, self.config.max_chunk_tokens);

        // Drop un-mergeable filler (pure markup/whitespace) before packing;
        // packed chunks are never dropped after this point.
        let pieces: Vec<String> = pieces
            .into_iter()
            .filter(|piece| !markdown::clean_text(piece).is_empty())
            .collect();

        let packed = pack(
            pieces,
            &self.counter,
            self.config.max_chunk_tokens,
            self.config.min_chunk_tokens,
        );
        let overlapped = overlap::inject(&packed, self.config.overlap, &self.counter);

        let assembler = Assembler::new(text, meta, &self.config.content_type, &self.counter);
        Ok(assembler.assemble(&overlapped))
    }

    /// Chunk raw text under ad-hoc metadata.
    pub fn process_text(&self, text: &str, title: &str, slug: &str) -> Result<Vec<Chunk>> {
        let document = Document::new(
            text,
            DocumentMeta {
                title: title.to_string(),
                slug: slug.to_string(),
                ..Default::default()
            },
        );
        self.process(&document)
    }

    fn require_meta(&self, meta: &DocumentMeta) -> Result<()> {
        if meta.title.trim().is_empty() {
            return Err(ChunkError::MissingMetadata {
                document: meta.display_name(),
                field: "title",
            });
        }
        if meta.slug.trim().is_empty() {
            return Err(ChunkError::MissingMetadata {
                document: meta.display_name(),
                field: "slug",
            });
        }
        Ok(())
    }
}

impl Default for ChunkProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ChunkProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkProcessor")
            .field("config", &self.config)
            .field("counter", &self.counter)
            .finish_non_exhaustive()
    }
}
