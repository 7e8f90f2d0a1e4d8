//! Chunk output records

use serde::{Deserialize, Serialize};

use crate::document::DocumentMeta;

/// Character offsets locating a chunk within its source document
///
/// Offsets are in characters, not bytes. `confidence` is 1.0 for an exact
/// substring match, 0.8 for a prefix match with an estimated end, and 0.0
/// when the chunk could not be located (offsets are then -1/-1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharOffsets {
    /// Start offset, or -1 when unresolved
    pub char_start: i64,
    /// End offset (exclusive), or -1 when unresolved
    pub char_end: i64,
    /// Length of the source document in characters
    pub source_length: usize,
    /// Match confidence: 1.0 exact, 0.8 partial, 0.0 none
    pub confidence: f64,
}

impl CharOffsets {
    /// The "no match" sentinel for a source of the given length.
    pub fn unresolved(source_length: usize) -> Self {
        Self {
            char_start: -1,
            char_end: -1,
            source_length,
            confidence: 0.0,
        }
    }
}

/// A markdown link extracted from a chunk before cleaning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// The anchor text
    pub text: String,
    /// The link target
    pub url: String,
}

/// One chunk record, ready for persistence and embedding
///
/// Chunks form a singly-linked ordered list per document: `prev_id`/`next_id`
/// follow insertion order from packing and are never reordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Deterministic id: `<content_type>:<slug>::ch<N>`
    pub id: String,
    /// Id of the owning document: `<content_type>:<slug>`
    pub parent_id: String,
    /// Id of the preceding chunk, absent for the first chunk
    pub prev_id: Option<String>,
    /// Id of the following chunk, absent for the last chunk
    pub next_id: Option<String>,
    /// Zero-based, contiguous index within the document
    pub chunk_number: usize,
    /// Id namespace this chunk was minted under
    pub content_type: String,
    /// Cleaned body with a prepended context header (title, section path)
    pub text_for_embedding: String,
    /// Raw packed markdown, pre-cleaning, for human rendering
    pub display_text: String,
    /// Token count of `text_for_embedding` under the run's counter
    pub token_count: usize,
    /// First heading line inside the chunk, if any
    pub heading: Option<String>,
    /// Ordered ancestor headings enclosing the chunk's position
    pub header_path: Vec<String>,
    /// `header_path` joined with " > "
    pub header_hierarchy: String,
    /// Location of the chunk within the original document text
    pub char_offsets: CharOffsets,
    /// Links extracted from the raw chunk markdown
    pub links: Vec<Link>,
    /// SHA-256 over the processed document content, for change detection
    pub source_content_sha256: String,
    /// SHA-256 of the raw source file, for provenance
    pub original_file_sha256: String,
    /// Document metadata echo
    pub metadata: DocumentMeta,
}

/// Mint the parent id for a document.
pub(crate) fn parent_id(content_type: &str, slug: &str) -> String {
    format!("{content_type}:{slug}")
}

/// Mint the id of chunk `index` under `parent`.
pub(crate) fn chunk_id(parent: &str, index: usize) -> String {
    format!("{parent}::ch{index}")
}
