//! File reading utilities

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

/// File reader with UTF-8 validation and provenance hashing
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text.
    pub fn read_text(path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// SHA-256 of the raw file contents, hex-encoded.
    pub fn file_sha256(path: &Path) -> Result<String> {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_utf8_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("post.md");
        fs::write(&path, "# Hello 世界\n").unwrap();

        let text = FileReader::read_text(&path).unwrap();
        assert_eq!(text, "# Hello 世界\n");
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = FileReader::read_text(Path::new("/no/such/file.md")).unwrap_err();
        assert!(err.to_string().contains("/no/such/file.md"));
    }

    #[test]
    fn hash_is_stable_hex_sha256() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("post.md");
        fs::write(&path, "content").unwrap();

        let first = FileReader::file_sha256(&path).unwrap();
        let second = FileReader::file_sha256(&path).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
