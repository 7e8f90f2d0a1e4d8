//! YAML front matter extraction
//!
//! Documents may open with a `---` fenced YAML block carrying title, slug,
//! date, tags, source URL, and image references. A document without front
//! matter is not an error; callers fall back to the first H1 heading and the
//! file stem.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Parsed YAML front matter fields
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    /// Document title
    pub title: Option<String>,
    /// Stable slug for chunk ids
    pub slug: Option<String>,
    /// Publication date, kept as written
    pub date: Option<String>,
    /// Document tags
    pub tags: Vec<String>,
    /// Canonical URL
    pub source_url: Option<String>,
    /// Image references with alt text
    pub images: Vec<ImageRef>,
}

/// An image reference from front matter
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImageRef {
    /// Image source path or URL
    pub src: Option<String>,
    /// Alt text
    pub alt: Option<String>,
}

impl FrontMatter {
    /// Non-empty alt texts of all referenced images.
    pub fn image_alt_texts(&self) -> Vec<String> {
        self.images
            .iter()
            .filter_map(|image| image.alt.clone())
            .filter(|alt| !alt.trim().is_empty())
            .collect()
    }
}

/// Split a document into front matter and body.
///
/// Returns default front matter and the full text when the opening `---`
/// fence is absent. An opening fence without a closing one is an error.
pub fn parse_front_matter(raw: &str) -> Result<(FrontMatter, &str)> {
    let Some(rest) = raw
        .strip_prefix("---\n")
        .or_else(|| raw.strip_prefix("---\r\n"))
    else {
        return Ok((FrontMatter::default(), raw));
    };

    // The closing fence is either the very next line or preceded by the
    // YAML block.
    let (yaml, after) = if rest == "---" {
        ("", "")
    } else if let Some(after) = rest
        .strip_prefix("---\n")
        .or_else(|| rest.strip_prefix("---\r\n"))
    {
        ("", after)
    } else {
        let end = rest
            .find("\n---")
            .context("unterminated front matter: missing closing '---'")?;
        (&rest[..end], &rest[end + "\n---".len()..])
    };
    let body = after
        .strip_prefix("\r\n")
        .or_else(|| after.strip_prefix('\n'))
        .unwrap_or(after);

    let front = if yaml.trim().is_empty() {
        FrontMatter::default()
    } else {
        serde_yaml::from_str(yaml).context("invalid YAML front matter")?
    };
    Ok((front, body))
}

/// Title fallback: the first H1 heading in the body, markers stripped.
pub fn fallback_title(body: &str) -> Option<String> {
    body.lines()
        .map(str::trim)
        .find(|line| line.starts_with("# "))
        .map(|line| line.trim_start_matches('#').trim().to_string())
}
