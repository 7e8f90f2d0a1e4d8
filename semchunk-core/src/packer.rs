//! Greedy packing of sized pieces into chunk texts
//!
//! Accumulates pieces toward the max-token budget, flushing when the next
//! piece would overflow. A piece over the budget at this stage should not
//! exist (decomposition ran first) but is defensively re-split on sight.
//! Every input piece lands in exactly one output chunk.

use std::collections::VecDeque;

use crate::splitter::hard_cut;
use crate::token::TokenCounter;

/// Pack pieces into chunk texts within `[min_tokens, max_tokens]`.
///
/// The final chunk may come in under `min_tokens`; the packer never exceeds
/// `max_tokens` by merging. An undersized flush mid-document can only happen
/// when the very next piece is nearly budget-sized on its own.
pub(crate) fn pack(
    pieces: Vec<String>,
    counter: &TokenCounter,
    max_tokens: usize,
    min_tokens: usize,
) -> Vec<String> {
    let mut queue: VecDeque<String> = pieces.into();
    let mut chunks: Vec<String> = Vec::new();
    let mut buffer: Vec<String> = Vec::new();
    let mut buffer_tokens = 0usize;
    // Joining pieces costs tokens too; without this a full buffer can
    // measure over budget once flushed.
    let separator_tokens = counter.count("\n\n");

    while let Some(piece) = queue.pop_front() {
        let piece_tokens = counter.count(&piece);

        if piece_tokens > max_tokens {
            // Slipped past decomposition; re-split and reconsider in order.
            for sub in hard_cut(&piece, counter, max_tokens).into_iter().rev() {
                queue.push_front(sub);
            }
            continue;
        }

        let join_cost = if buffer.is_empty() { 0 } else { separator_tokens };
        if buffer_tokens + join_cost + piece_tokens <= max_tokens {
            buffer.push(piece);
            buffer_tokens += join_cost + piece_tokens;
            continue;
        }

        // Overflow. An undersized buffer would accept the piece only if the
        // merged total still fit the budget, which the branch above already
        // ruled out, so flushing is the one deterministic choice left.
        if buffer_tokens < min_tokens {
            tracing::debug!(
                tokens = buffer_tokens,
                min = min_tokens,
                "flushing undersized chunk; next piece would overflow the budget"
            );
        }
        flush(&mut buffer, &mut chunks);
        buffer_tokens = piece_tokens;
        buffer.push(piece);
    }

    flush(&mut buffer, &mut chunks);
    chunks
}

fn flush(buffer: &mut Vec<String>, chunks: &mut Vec<String>) {
    if buffer.is_empty() {
        return;
    }
    chunks.push(buffer.join("\n\n"));
    buffer.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> TokenCounter {
        TokenCounter::heuristic()
    }

    fn words(n: usize) -> String {
        "word ".repeat(n).trim().to_string()
    }

    #[test]
    fn everything_fits_in_one_chunk() {
        let pieces = vec![words(10), words(10), words(10)];
        let chunks = pack(pieces, &counter(), 100, 5);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].contains("word"));
    }

    #[test]
    fn flushes_at_budget_boundary() {
        // Each piece ~13 tokens; budget 30 holds two pieces, not three.
        let pieces = vec![words(10), words(10), words(10), words(10)];
        let chunks = pack(pieces, &counter(), 30, 5);
        assert_eq!(chunks.len(), 2);
    }

    #[test]
    fn no_piece_is_dropped() {
        let c = counter();
        let pieces: Vec<String> = (1..=9).map(words).collect();
        let chunks = pack(pieces.clone(), &c, 15, 3);
        let packed = chunks.join("\n\n");
        for piece in &pieces {
            assert!(packed.contains(piece.as_str()));
        }
    }

    #[test]
    fn final_chunk_may_be_undersized() {
        let pieces = vec![words(40), words(3)];
        let chunks = pack(pieces, &counter(), 50, 10);
        assert_eq!(chunks.len(), 2);
        let c = counter();
        assert!(c.count(&chunks[1]) < 10);
    }

    #[test]
    fn oversized_piece_is_resplit_defensively() {
        let c = counter();
        let pieces = vec![words(200)];
        let chunks = pack(pieces, &c, 50, 10);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(c.count(chunk) <= 50);
        }
    }

    #[test]
    fn pieces_join_with_blank_line() {
        let chunks = pack(vec!["one".into(), "two".into()], &counter(), 100, 0);
        assert_eq!(chunks, vec!["one\n\ntwo"]);
    }
}
