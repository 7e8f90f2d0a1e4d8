//! Recursive coarse-to-fine decomposition
//!
//! Applies the splitter chain in order, recursing only into pieces that are
//! still over budget and falling back to the word-boundary hard cut once the
//! chain is exhausted.

use crate::splitter::{hard_cut, Splitter};
use crate::token::TokenCounter;

/// Decompose `text` into pieces each within `max_tokens`.
///
/// Pieces already under budget are kept whole; empty and all-whitespace
/// pieces never reach the output.
pub(crate) fn decompose(
    text: &str,
    chain: &[Box<dyn Splitter>],
    counter: &TokenCounter,
    max_tokens: usize,
) -> Vec<String> {
    let mut out = Vec::new();
    decompose_into(text, chain, counter, max_tokens, &mut out);
    out
}

fn decompose_into(
    text: &str,
    chain: &[Box<dyn Splitter>],
    counter: &TokenCounter,
    max_tokens: usize,
    out: &mut Vec<String>,
) {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return;
    }

    let Some((splitter, finer)) = chain.split_first() else {
        out.extend(hard_cut(trimmed, counter, max_tokens));
        return;
    };

    let pieces = splitter.split(trimmed);
    if pieces.len() <= 1 {
        // No boundary at this granularity; recurse with the finer chain on
        // the same text instead of looping forever.
        if counter.count(trimmed) > max_tokens {
            decompose_into(trimmed, finer, counter, max_tokens, out);
        } else {
            out.push(trimmed.to_string());
        }
        return;
    }

    for piece in pieces {
        if counter.count(&piece) > max_tokens {
            decompose_into(&piece, finer, counter, max_tokens, out);
        } else if !piece.trim().is_empty() {
            out.push(piece);
        }
    }
}
