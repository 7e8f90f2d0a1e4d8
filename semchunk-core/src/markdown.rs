//! Markdown cleaning and link extraction
//!
//! Link extraction runs on the raw chunk text; cleaning produces the body
//! used for embedding. `display_text` always keeps the raw form.

use std::sync::LazyLock;

use regex::Regex;

use crate::chunk::Link;

static LINK_OR_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(!?)\[([^\]]*)\]\(([^)]*)\)").expect("static pattern"));
static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]*)\)").expect("static pattern"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").expect("static pattern"));
static FENCE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*```[^\n]*$").expect("static pattern"));
static STRIKETHROUGH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~~([^~]+)~~").expect("static pattern"));
static BOLD_STARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("static pattern"));
static BOLD_UNDERSCORES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__([^_]+)__").expect("static pattern"));
static EMPHASIS_STAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\n]+)\*").expect("static pattern"));
static EMPHASIS_UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b_([^_\n]+)_\b").expect("static pattern"));
static CODE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`\n]+)`").expect("static pattern"));
static HEADING_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,6} +").expect("static pattern"));
static EXTRA_BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("static pattern"));

/// Extract `[text](url)` links from raw markdown, ignoring images.
pub(crate) fn extract_links(raw: &str) -> Vec<Link> {
    LINK_OR_IMAGE
        .captures_iter(raw)
        .filter(|caps| caps[1].is_empty())
        .filter(|caps| !caps[3].trim().is_empty())
        .map(|caps| Link {
            text: caps[2].trim().to_string(),
            url: caps[3].trim().to_string(),
        })
        .collect()
}

/// Strip link syntax and decorative markup, keeping the readable text.
///
/// Images reduce to their alt text, links to their anchor text, fence
/// delimiter lines disappear (their content stays), heading markers drop.
pub(crate) fn clean_text(raw: &str) -> String {
    let text = FENCE_LINE.replace_all(raw, "");
    let text = IMAGE.replace_all(&text, "$1");
    let text = LINK.replace_all(&text, "$1");
    let text = STRIKETHROUGH.replace_all(&text, "$1");
    let text = BOLD_STARS.replace_all(&text, "$1");
    let text = BOLD_UNDERSCORES.replace_all(&text, "$1");
    let text = EMPHASIS_STAR.replace_all(&text, "$1");
    let text = EMPHASIS_UNDERSCORE.replace_all(&text, "$1");
    let text = CODE_SPAN.replace_all(&text, "$1");
    let text = HEADING_MARKER.replace_all(&text, "");
    let text = EXTRA_BLANK_LINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}
