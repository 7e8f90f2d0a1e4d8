//! Document input records
//!
//! Documents arrive from external collaborators (file discovery, front-matter
//! parsing) already loaded; the core only reads them.

use serde::{Deserialize, Serialize};

/// Metadata describing a source document
///
/// `title` and `slug` are required to mint chunk ids; everything else is
/// carried through into each chunk's metadata block untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Document title
    pub title: String,
    /// Stable slug used in chunk ids
    pub slug: String,
    /// Publication date, passed through as an opaque string
    #[serde(default)]
    pub date: Option<String>,
    /// Document tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Canonical URL of the document, if any
    #[serde(default)]
    pub source_url: Option<String>,
    /// Source file path
    #[serde(default)]
    pub path: Option<String>,
    /// SHA-256 of the raw source file, for provenance
    #[serde(default)]
    pub original_file_sha256: String,
    /// Alt texts of images referenced by the document
    #[serde(default)]
    pub image_alt_texts: Vec<String>,
}

impl DocumentMeta {
    /// Best human-readable name for error messages: path, then slug, then title.
    pub fn display_name(&self) -> String {
        if let Some(path) = self.path.as_deref().filter(|p| !p.is_empty()) {
            return path.to_string();
        }
        if !self.slug.is_empty() {
            return self.slug.clone();
        }
        self.title.clone()
    }
}

/// A document ready for chunking: raw markdown plus its metadata
#[derive(Debug, Clone)]
pub struct Document {
    /// Full raw text, front matter already stripped
    pub text: String,
    /// Document-level metadata
    pub meta: DocumentMeta,
}

impl Document {
    /// Assemble a document from raw text and metadata.
    pub fn new(text: impl Into<String>, meta: DocumentMeta) -> Self {
        Self {
            text: text.into(),
            meta,
        }
    }
}
