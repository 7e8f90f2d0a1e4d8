//! Overlap injection across adjacent chunks
//!
//! A forward, one-pass transformation: each chunk after the first gets the
//! trailing slice of its predecessor's *pre-overlap* text prepended, so
//! overlap never cascades across more than one boundary.

use crate::config::OverlapPolicy;
use crate::splitter::split_sentences;
use crate::token::TokenCounter;

/// Inject overlap into packed chunk texts.
///
/// The first chunk is never modified. The slice prepended to chunk `i` is
/// always taken from the original (pre-overlap) text of chunk `i - 1`.
pub(crate) fn inject(
    texts: &[String],
    policy: OverlapPolicy,
    counter: &TokenCounter,
) -> Vec<String> {
    if matches!(policy, OverlapPolicy::None) || texts.len() < 2 {
        return texts.to_vec();
    }

    let mut out = Vec::with_capacity(texts.len());
    for (i, text) in texts.iter().enumerate() {
        if i == 0 {
            out.push(text.clone());
            continue;
        }
        let tail = match policy {
            OverlapPolicy::Sentences(n) => trailing_sentences(&texts[i - 1], n),
            OverlapPolicy::Tokens(n) => trailing_tokens(&texts[i - 1], n, counter),
            OverlapPolicy::None => unreachable!(),
        };
        if tail.is_empty() {
            out.push(text.clone());
        } else {
            out.push(format!("{tail} {text}"));
        }
    }
    out
}

/// The last `n` sentences of `text`, space-joined.
fn trailing_sentences(text: &str, n: usize) -> String {
    if n == 0 {
        return String::new();
    }
    let sentences = split_sentences(text);
    let start = sentences.len().saturating_sub(n);
    sentences[start..].join(" ")
}

/// Roughly the last `budget` tokens' worth of trailing words of `text`.
fn trailing_tokens(text: &str, budget: usize, counter: &TokenCounter) -> String {
    if budget == 0 {
        return String::new();
    }
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut taken = 0usize;
    let mut tokens = 0usize;
    for word in words.iter().rev() {
        let word_tokens = counter.count(&format!("{word} "));
        if tokens + word_tokens > budget {
            break;
        }
        tokens += word_tokens;
        taken += 1;
    }
    if taken == 0 {
        return String::new();
    }
    if taken == words.len() {
        return text.to_string();
    }
    words[words.len() - taken..].join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> TokenCounter {
        TokenCounter::heuristic()
    }

    #[test]
    fn first_chunk_is_untouched() {
        let texts = vec!["First body. End of first.".to_string(), "Second body.".to_string()];
        let out = inject(&texts, OverlapPolicy::Sentences(1), &counter());
        assert_eq!(out[0], texts[0]);
    }

    #[test]
    fn sentence_overlap_prepends_previous_tail() {
        let texts = vec![
            "First sentence. Second sentence.".to_string(),
            "Third sentence.".to_string(),
        ];
        let out = inject(&texts, OverlapPolicy::Sentences(1), &counter());
        assert_eq!(out[1], "Second sentence. Third sentence.");
    }

    #[test]
    fn overlap_never_cascades() {
        let texts = vec![
            "One one. Tail A.".to_string(),
            "Two two. Tail B.".to_string(),
            "Three three.".to_string(),
        ];
        let out = inject(&texts, OverlapPolicy::Sentences(1), &counter());
        // Chunk 2's overlap comes from chunk 1's pre-overlap text, so
        // chunk 0's tail never reaches chunk 2.
        assert_eq!(out[2], "Tail B. Three three.");
        assert!(!out[2].contains("Tail A."));
    }

    #[test]
    fn token_overlap_takes_trailing_words() {
        let prev = "alpha beta gamma delta".to_string();
        let texts = vec![prev, "next chunk".to_string()];
        let out = inject(&texts, OverlapPolicy::Tokens(4), &counter());
        // ~4 tokens of trailing context: the last couple of words.
        assert!(out[1].ends_with("next chunk"));
        assert!(out[1].contains("delta"));
        assert!(!out[1].starts_with("alpha"));
    }

    #[test]
    fn none_policy_is_identity() {
        let texts = vec!["a".to_string(), "b".to_string()];
        assert_eq!(inject(&texts, OverlapPolicy::None, &counter()), texts);
    }

    #[test]
    fn whole_previous_chunk_can_be_the_overlap() {
        let texts = vec!["tiny".to_string(), "next".to_string()];
        let out = inject(&texts, OverlapPolicy::Tokens(100), &counter());
        assert_eq!(out[1], "tiny next");
    }
}
