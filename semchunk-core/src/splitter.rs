//! Structural splitters ordered coarse to fine
//!
//! Each splitter cuts at one granularity (heading, paragraph, sentence,
//! symbol) and returns ordered non-empty pieces whose concatenation
//! reconstructs the input's content modulo separators. A single returned
//! piece signals "no boundary at this granularity" and the caller falls
//! through to the next, finer splitter. The word-boundary hard cut is the
//! last resort and always terminates.

use crate::config::StructureProfile;
use crate::token::TokenCounter;

/// A rule that cuts text at one structural granularity
pub(crate) trait Splitter: Send + Sync {
    /// Split into ordered, trimmed, non-empty pieces.
    fn split(&self, text: &str) -> Vec<String>;
}

/// True for a code fence delimiter line (``` with optional info string).
pub(crate) fn is_fence_marker(line: &str) -> bool {
    line.trim_start().starts_with("```")
}

/// Heading level of a markdown heading line (1-6), if it is one.
pub(crate) fn heading_level(line: &str) -> Option<usize> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if (1..=6).contains(&hashes) && line.as_bytes().get(hashes) == Some(&b' ') {
        Some(hashes)
    } else {
        None
    }
}

/// Cuts immediately before each markdown heading line
///
/// Text before the first heading becomes its own piece. Heading-looking
/// lines inside code fences (shell comments and the like) do not cut.
#[derive(Debug, Default)]
pub(crate) struct HeadingSplitter;

impl Splitter for HeadingSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut current = String::new();
        let mut in_fence = false;

        for line in text.lines() {
            if is_fence_marker(line) {
                in_fence = !in_fence;
            }
            if !in_fence && heading_level(line).is_some() && !current.trim().is_empty() {
                pieces.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
        if !current.trim().is_empty() {
            pieces.push(current);
        }

        pieces.iter().map(|p| p.trim().to_string()).collect()
    }
}

/// Cuts on blank-line runs, keeping fenced code blocks whole
#[derive(Debug, Default)]
pub(crate) struct ParagraphSplitter;

impl Splitter for ParagraphSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut current = String::new();
        let mut in_fence = false;

        for line in text.lines() {
            if is_fence_marker(line) {
                in_fence = !in_fence;
            }
            if !in_fence && line.trim().is_empty() {
                if !current.trim().is_empty() {
                    pieces.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
                continue;
            }
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
        if !current.trim().is_empty() {
            pieces.push(current);
        }

        pieces.iter().map(|p| p.trim().to_string()).collect()
    }
}

/// Cuts after sentence-terminal punctuation, keeping fenced code blocks whole
#[derive(Debug, Default)]
pub(crate) struct SentenceSplitter;

impl Splitter for SentenceSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        let mut pieces = Vec::new();
        for (is_code, segment) in fence_segments(text) {
            if is_code {
                pieces.push(segment);
            } else {
                pieces.extend(split_sentences(&segment));
            }
        }
        pieces
    }
}

/// Partition text into alternating prose and fenced-code segments.
///
/// Fence delimiter lines stay with their code segment; an unclosed fence
/// runs to the end of the text.
fn fence_segments(text: &str) -> Vec<(bool, String)> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_fence = false;

    fn flush(buf: &mut String, is_code: bool, out: &mut Vec<(bool, String)>) {
        if !buf.trim().is_empty() {
            out.push((is_code, buf.trim().to_string()));
        }
        buf.clear();
    }

    for line in text.lines() {
        if is_fence_marker(line) {
            if in_fence {
                // Closing fence belongs to the code segment.
                current.push('\n');
                current.push_str(line);
                flush(&mut current, true, &mut segments);
                in_fence = false;
                continue;
            }
            flush(&mut current, false, &mut segments);
            in_fence = true;
            current.push_str(line);
            continue;
        }
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
    }
    flush(&mut current, in_fence, &mut segments);

    segments
}

/// Split prose at sentence boundaries: terminal punctuation followed by
/// whitespace and a capital, digit, opening quote, or opening paren.
pub(crate) fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (pos, ch) = chars[i];
        let preceded = i > 0 && !chars[i - 1].1.is_whitespace();
        if preceded && matches!(ch, '.' | '!' | '?') {
            let mut j = i + 1;
            while j < chars.len() && chars[j].1.is_whitespace() {
                j += 1;
            }
            if j > i + 1 && j < chars.len() && starts_sentence(chars[j].1) {
                let end = pos + ch.len_utf8();
                let sentence = text[start..end].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence.to_string());
                }
                start = chars[j].0;
                i = j;
                continue;
            }
        }
        i += 1;
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }
    sentences
}

fn starts_sentence(ch: char) -> bool {
    ch.is_uppercase() || ch.is_ascii_digit() || matches!(ch, '"' | '\'' | '\u{201C}' | '\u{2018}' | '(')
}

/// Cuts before top-level symbol definition lines (code profile)
#[derive(Debug, Default)]
pub(crate) struct CodeSymbolSplitter;

const SYMBOL_PREFIXES: &[&str] = &[
    "def ", "class ", "fn ", "pub fn ", "function ", "export ", "const ", "let ", "var ",
];

impl Splitter for CodeSymbolSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut current = String::new();

        for line in text.lines() {
            let starts_symbol = SYMBOL_PREFIXES
                .iter()
                .any(|p| line.trim_start().starts_with(p));
            if starts_symbol && !current.trim().is_empty() {
                pieces.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
        if !current.trim().is_empty() {
            pieces.push(current);
        }

        pieces.iter().map(|p| p.trim().to_string()).collect()
    }
}

/// The splitter chain for a structure profile, coarse to fine.
pub(crate) fn chain_for(profile: StructureProfile) -> Vec<Box<dyn Splitter>> {
    match profile {
        StructureProfile::Markdown => vec![
            Box::new(HeadingSplitter),
            Box::new(ParagraphSplitter),
            Box::new(SentenceSplitter),
        ],
        StructureProfile::Plain => {
            vec![Box::new(ParagraphSplitter), Box::new(SentenceSplitter)]
        }
        StructureProfile::Code => vec![
            Box::new(CodeSymbolSplitter),
            Box::new(ParagraphSplitter),
            Box::new(SentenceSplitter),
        ],
    }
}

/// Word-boundary greedy cut: fill each piece up to the token budget.
///
/// Terminates unconditionally since it only ever removes whole words. A
/// single word over the budget is emitted as-is and warned about; it is
/// irreducible at this level.
pub(crate) fn hard_cut(text: &str, counter: &TokenCounter, max_tokens: usize) -> Vec<String> {
    let mut pieces: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_tokens = 0usize;

    for word in text.split_whitespace() {
        let word_tokens = counter.count(&format!("{word} "));
        if current_tokens + word_tokens > max_tokens && !current.is_empty() {
            pieces.push(current.join(" "));
            current.clear();
            current_tokens = 0;
        }
        current.push(word);
        current_tokens += word_tokens;
    }
    if !current.is_empty() {
        pieces.push(current.join(" "));
    }

    for piece in &pieces {
        let count = counter.count(piece);
        if count > max_tokens {
            tracing::warn!(
                tokens = count,
                budget = max_tokens,
                "irreducible unit exceeds token budget; emitting oversized"
            );
        }
    }
    pieces
}
