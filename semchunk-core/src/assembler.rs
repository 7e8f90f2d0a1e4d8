//! Chunk assembly: metadata attachment and provenance
//!
//! Runs strictly after packing and overlap injection; chunk text is final
//! before any metadata is computed. All failure handling here is local and
//! non-fatal: a chunk that cannot be located in the source degrades its
//! offset confidence instead of failing the document.

use sha2::{Digest, Sha256};

use crate::chunk::{chunk_id, parent_id, CharOffsets, Chunk};
use crate::document::DocumentMeta;
use crate::markdown;
use crate::outline::{build_outline, header_path_at, OutlineEntry};
use crate::splitter::heading_level;
use crate::token::TokenCounter;

/// Per-document assembler; built once, applied to every chunk text in order.
pub(crate) struct Assembler<'a> {
    source: &'a str,
    meta: &'a DocumentMeta,
    counter: &'a TokenCounter,
    outline: Vec<OutlineEntry>,
    source_chars: usize,
    source_hash: String,
    parent: String,
    content_type: String,
}

impl<'a> Assembler<'a> {
    pub(crate) fn new(
        source: &'a str,
        meta: &'a DocumentMeta,
        content_type: &str,
        counter: &'a TokenCounter,
    ) -> Self {
        let source_hash = hex::encode(Sha256::digest(source.as_bytes()));
        Self {
            source,
            meta,
            counter,
            outline: build_outline(source),
            source_chars: source.chars().count(),
            source_hash,
            parent: parent_id(content_type, &meta.slug),
            content_type: content_type.to_string(),
        }
    }

    /// Assemble every packed+overlapped text into a full chunk record.
    pub(crate) fn assemble(&self, texts: &[String]) -> Vec<Chunk> {
        let total = texts.len();
        texts
            .iter()
            .enumerate()
            .map(|(index, text)| self.assemble_one(text, index, total))
            .collect()
    }

    fn assemble_one(&self, text: &str, index: usize, total: usize) -> Chunk {
        let links = markdown::extract_links(text);
        let heading = first_heading(text);
        let char_offsets = self.locate(text);

        let header_path = if char_offsets.confidence > 0.0 {
            header_path_at(&self.outline, char_offsets.char_start as usize)
        } else {
            Vec::new()
        };
        let header_hierarchy = header_path.join(" > ");

        let cleaned = markdown::clean_text(text);
        let text_for_embedding =
            self.embed_text(&cleaned, heading.as_deref(), &header_hierarchy);
        let token_count = self.counter.count(&text_for_embedding);

        Chunk {
            id: chunk_id(&self.parent, index),
            parent_id: self.parent.clone(),
            prev_id: (index > 0).then(|| chunk_id(&self.parent, index - 1)),
            next_id: (index + 1 < total).then(|| chunk_id(&self.parent, index + 1)),
            chunk_number: index,
            content_type: self.content_type.clone(),
            text_for_embedding,
            display_text: text.to_string(),
            token_count,
            heading,
            header_path,
            header_hierarchy,
            char_offsets,
            links,
            source_content_sha256: self.source_hash.clone(),
            original_file_sha256: self.meta.original_file_sha256.clone(),
            metadata: self.meta.clone(),
        }
    }

    /// Locate the chunk in the original source: exact match, then a
    /// 100-character prefix match at reduced confidence, then the sentinel.
    fn locate(&self, text: &str) -> CharOffsets {
        let needle = text.trim();
        if needle.is_empty() || self.source.is_empty() {
            return CharOffsets::unresolved(self.source_chars);
        }

        if let Some(byte_start) = self.source.find(needle) {
            let char_start = self.source[..byte_start].chars().count();
            return CharOffsets {
                char_start: char_start as i64,
                char_end: (char_start + needle.chars().count()) as i64,
                source_length: self.source_chars,
                confidence: 1.0,
            };
        }

        let prefix: String = needle.chars().take(100).collect();
        if let Some(byte_start) = self.source.find(prefix.as_str()) {
            let char_start = self.source[..byte_start].chars().count();
            let estimated_end = (char_start + needle.chars().count()).min(self.source_chars);
            tracing::debug!("exact offset match failed; using prefix match at {char_start}");
            return CharOffsets {
                char_start: char_start as i64,
                char_end: estimated_end as i64,
                source_length: self.source_chars,
                confidence: 0.8,
            };
        }

        tracing::debug!("chunk text not found in source; offsets unresolved");
        CharOffsets::unresolved(self.source_chars)
    }

    /// Prefix the cleaned body with document identity so a chunk embeds
    /// meaningfully even when retrieved out of context.
    fn embed_text(&self, cleaned: &str, heading: Option<&str>, hierarchy: &str) -> String {
        let title_line = format!("Title: {}", self.meta.title);
        if !hierarchy.is_empty() {
            return format!("{title_line}\nSection: {hierarchy}\n\n{cleaned}");
        }
        match heading {
            Some(h) if !h.starts_with(&self.meta.title) => {
                format!("{title_line}\n{h}\n\n{cleaned}")
            }
            _ => format!("{title_line}\n\n{cleaned}"),
        }
    }
}

/// First heading line inside the chunk, marker included.
fn first_heading(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find(|line| heading_level(line).is_some())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "# Guide\n\nIntro paragraph here.\n\n## Install\n\nRun the installer now.\n";

    fn meta() -> DocumentMeta {
        DocumentMeta {
            title: "Guide".into(),
            slug: "guide".into(),
            original_file_sha256: "abc123".into(),
            ..Default::default()
        }
    }

    #[test]
    fn exact_offsets_round_trip() {
        let counter = TokenCounter::heuristic();
        let m = meta();
        let assembler = Assembler::new(SOURCE, &m, "post", &counter);
        let offsets = assembler.locate("Intro paragraph here.");
        assert_eq!(offsets.confidence, 1.0);
        let start = offsets.char_start as usize;
        let end = offsets.char_end as usize;
        assert_eq!(&SOURCE[start..end], "Intro paragraph here.");
    }

    #[test]
    fn prefix_match_degrades_confidence() {
        let counter = TokenCounter::heuristic();
        let m = meta();
        let para = "Alpha beta gamma delta epsilon zeta eta theta iota kappa lambda mu nu xi \
                    omicron pi rho sigma tau upsilon phi chi psi omega.";
        let source = format!("# T\n\n{para}\n");
        let assembler = Assembler::new(&source, &m, "post", &counter);
        // First 100 characters match the source; the stitched tail does not.
        let stitched = format!("{para} words appended by overlap injection");
        let offsets = assembler.locate(&stitched);
        assert_eq!(offsets.confidence, 0.8);
        assert!(offsets.char_start >= 0);
        assert!(offsets.char_end >= offsets.char_start);
        assert!(offsets.char_end as usize <= source.chars().count());
    }

    #[test]
    fn unlocatable_text_yields_sentinel() {
        let counter = TokenCounter::heuristic();
        let m = meta();
        let assembler = Assembler::new(SOURCE, &m, "post", &counter);
        let offsets = assembler.locate("completely unrelated content");
        assert_eq!(offsets.confidence, 0.0);
        assert_eq!(offsets.char_start, -1);
        assert_eq!(offsets.char_end, -1);
    }

    #[test]
    fn assemble_links_chunks_in_order() {
        let counter = TokenCounter::heuristic();
        let m = meta();
        let assembler = Assembler::new(SOURCE, &m, "post", &counter);
        let texts = vec![
            "# Guide\n\nIntro paragraph here.".to_string(),
            "## Install\n\nRun the installer now.".to_string(),
        ];
        let chunks = assembler.assemble(&texts);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].id, "post:guide::ch0");
        assert_eq!(chunks[1].id, "post:guide::ch1");
        assert_eq!(chunks[0].prev_id, None);
        assert_eq!(chunks[0].next_id.as_deref(), Some("post:guide::ch1"));
        assert_eq!(chunks[1].prev_id.as_deref(), Some("post:guide::ch0"));
        assert_eq!(chunks[1].next_id, None);
        assert_eq!(chunks[0].chunk_number, 0);
        assert_eq!(chunks[1].chunk_number, 1);
    }

    #[test]
    fn header_context_reaches_embed_text() {
        let counter = TokenCounter::heuristic();
        let m = meta();
        let assembler = Assembler::new(SOURCE, &m, "post", &counter);
        let texts = vec!["## Install\n\nRun the installer now.".to_string()];
        let chunks = assembler.assemble(&texts);

        assert_eq!(chunks[0].heading.as_deref(), Some("## Install"));
        assert_eq!(chunks[0].header_path, vec!["Guide", "Install"]);
        assert_eq!(chunks[0].header_hierarchy, "Guide > Install");
        assert!(chunks[0].text_for_embedding.starts_with("Title: Guide\nSection: Guide > Install\n\n"));
        assert!(chunks[0].text_for_embedding.contains("Run the installer now."));
    }

    #[test]
    fn hashes_are_attached() {
        let counter = TokenCounter::heuristic();
        let m = meta();
        let assembler = Assembler::new(SOURCE, &m, "post", &counter);
        let chunks = assembler.assemble(&["Intro paragraph here.".to_string()]);
        assert_eq!(chunks[0].source_content_sha256.len(), 64);
        assert_eq!(chunks[0].original_file_sha256, "abc123");
    }
}
