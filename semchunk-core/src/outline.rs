//! Document heading outline and ancestor resolution
//!
//! The outline is built once per document and queried for every chunk: given
//! a chunk's resolved start position, walk the headings at or before it and
//! keep the deepest stack of ancestors in level order.

use crate::splitter::{heading_level, is_fence_marker};

/// A heading occurrence in the source document
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OutlineEntry {
    /// Heading level, 1-6
    pub level: usize,
    /// Heading text without markers
    pub text: String,
    /// Character offset of the heading line in the source
    pub offset: usize,
}

/// Heading text of a heading line, markers stripped.
fn heading_text(line: &str) -> &str {
    line.trim_start_matches('#').trim()
}

/// Collect all heading lines with level and character offset, skipping
/// heading-looking lines inside code fences.
pub(crate) fn build_outline(source: &str) -> Vec<OutlineEntry> {
    let mut entries = Vec::new();
    let mut offset = 0usize;
    let mut in_fence = false;

    for line in source.lines() {
        if is_fence_marker(line) {
            in_fence = !in_fence;
        }
        if !in_fence {
            if let Some(level) = heading_level(line) {
                entries.push(OutlineEntry {
                    level,
                    text: heading_text(line).to_string(),
                    offset,
                });
            }
        }
        offset += line.chars().count() + 1;
    }
    entries
}

/// Ancestor heading texts enclosing `position`, outermost first.
///
/// A heading at level L replaces any previous headings at level L or deeper,
/// so the result is the heading stack in strict level order.
pub(crate) fn header_path_at(outline: &[OutlineEntry], position: usize) -> Vec<String> {
    let mut stack: Vec<&OutlineEntry> = Vec::new();
    for entry in outline.iter().take_while(|e| e.offset <= position) {
        while stack.last().is_some_and(|top| top.level >= entry.level) {
            stack.pop();
        }
        stack.push(entry);
    }
    stack.iter().map(|e| e.text.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "# Title\n\nintro\n\n## Setup\n\nbody\n\n### Details\n\nmore\n\n## Usage\n\nrest\n";

    #[test]
    fn outline_collects_levels_and_offsets() {
        let outline = build_outline(DOC);
        let levels: Vec<usize> = outline.iter().map(|e| e.level).collect();
        assert_eq!(levels, vec![1, 2, 3, 2]);
        assert_eq!(outline[0].text, "Title");
        assert_eq!(outline[0].offset, 0);
        assert!(outline[1].offset > outline[0].offset);
    }

    #[test]
    fn path_resolves_deepest_ancestors() {
        let outline = build_outline(DOC);
        // Position of "more", inside Title > Setup > Details.
        let pos = DOC.find("more").unwrap();
        let path = header_path_at(&outline, pos);
        assert_eq!(path, vec!["Title", "Setup", "Details"]);
    }

    #[test]
    fn sibling_heading_pops_deeper_levels() {
        let outline = build_outline(DOC);
        let pos = DOC.find("rest").unwrap();
        let path = header_path_at(&outline, pos);
        assert_eq!(path, vec!["Title", "Usage"]);
    }

    #[test]
    fn position_before_any_heading_has_empty_path() {
        let outline = build_outline("text first\n\n# Later\nbody");
        assert!(header_path_at(&outline, 0).is_empty());
    }

    #[test]
    fn fenced_hashes_are_not_headings() {
        let outline = build_outline("# Real\n```sh\n# comment\n```\n");
        assert_eq!(outline.len(), 1);
        assert_eq!(outline[0].text, "Real");
    }
}
