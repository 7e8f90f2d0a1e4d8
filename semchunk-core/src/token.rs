//! Token counting with an explicit heuristic fallback
//!
//! Splitting, packing, and the reported `token_count` of every chunk all go
//! through one [`TokenCounter`], so the measure used to cut text is the same
//! measure the records carry.

use std::sync::Arc;

use tiktoken_rs::CoreBPE;

/// Counting scheme selected at construction time
#[derive(Clone)]
enum Scheme {
    /// cl100k_base BPE (the encoding used by mainstream embedding models)
    Bpe(Arc<CoreBPE>),
    /// ~4 characters per token estimate
    Heuristic,
}

/// Deterministic token counter shared across a whole pipeline run
///
/// Holds no per-call mutable state; a single counter may be shared across
/// threads when documents are processed in parallel.
#[derive(Clone)]
pub struct TokenCounter {
    scheme: Scheme,
}

impl TokenCounter {
    /// Create a counter backed by the cl100k_base BPE, falling back to the
    /// character heuristic when the encoding cannot be loaded.
    ///
    /// The fallback is deliberate and logged, never silent: callers must
    /// tolerate approximate counts either way.
    pub fn new() -> Self {
        match tiktoken_rs::cl100k_base() {
            Ok(bpe) => Self {
                scheme: Scheme::Bpe(Arc::new(bpe)),
            },
            Err(err) => {
                tracing::warn!("cl100k_base tokenizer unavailable ({err}); using character heuristic");
                Self::heuristic()
            }
        }
    }

    /// Create a counter that uses the character heuristic unconditionally.
    ///
    /// Useful for tests and environments where BPE initialization cost is
    /// unwanted; counts are monotone in text length but approximate.
    pub fn heuristic() -> Self {
        Self {
            scheme: Scheme::Heuristic,
        }
    }

    /// Count tokens in `text` under the selected scheme.
    pub fn count(&self, text: &str) -> usize {
        match &self.scheme {
            Scheme::Bpe(bpe) => bpe.encode_ordinary(text).len(),
            Scheme::Heuristic => text.len().div_ceil(4).max(1),
        }
    }

    /// Whether this counter runs on the heuristic fallback.
    pub fn is_heuristic(&self) -> bool {
        matches!(self.scheme, Scheme::Heuristic)
    }
}

impl Default for TokenCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let scheme = match self.scheme {
            Scheme::Bpe(_) => "cl100k_base",
            Scheme::Heuristic => "heuristic",
        };
        f.debug_struct("TokenCounter").field("scheme", &scheme).finish()
    }
}
