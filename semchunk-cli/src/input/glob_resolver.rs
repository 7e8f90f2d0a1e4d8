//! File pattern resolution using glob

use std::path::PathBuf;

use anyhow::{Context, Result};
use glob::glob;

use crate::error::CliError;

/// Resolve file patterns to a sorted, deduplicated list of files.
///
/// Directories matched by a pattern are skipped; matching zero files across
/// all patterns is an error, since a run that silently does nothing is worse
/// than a loud one.
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let paths = glob(pattern)
            .map_err(|_| CliError::InvalidPattern(pattern.clone()))
            .with_context(|| format!("while expanding '{pattern}'"))?;

        for path in paths {
            let path = path.with_context(|| format!("while expanding '{pattern}'"))?;
            if path.is_file() {
                files.push(path);
            }
        }
    }

    files.sort();
    files.dedup();

    if files.is_empty() {
        return Err(CliError::NoInputFiles(patterns.join(", ")).into());
    }

    for path in &files {
        let is_markdown = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"));
        if !is_markdown {
            log::warn!("{} does not look like markdown; processing anyway", path.display());
        }
    }

    Ok(files)
}
