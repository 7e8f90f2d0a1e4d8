//! JSON-per-chunk persistence
//!
//! Each chunk record lands in its own file so downstream embedding jobs can
//! stream, retry, and re-embed at chunk granularity. File names derive from
//! the chunk id: `post:slug::ch0` becomes `post_slug__ch0.json`.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use semchunk_core::Chunk;

/// Writes chunk records into an output directory
#[derive(Debug)]
pub struct ChunkWriter {
    directory: PathBuf,
    pretty: bool,
}

impl ChunkWriter {
    /// Create the output directory (if needed) and a writer into it.
    pub fn create(directory: &Path, pretty: bool) -> Result<Self> {
        fs::create_dir_all(directory)
            .with_context(|| format!("Failed to create output directory: {}", directory.display()))?;
        Ok(Self {
            directory: directory.to_path_buf(),
            pretty,
        })
    }

    /// File name for a chunk, derived from its id.
    pub fn file_name(chunk: &Chunk) -> String {
        format!("{}.json", chunk.id.replace(':', "_"))
    }

    /// Remove stale chunk files for a content type from earlier runs.
    pub fn clean_existing(&self, content_type: &str) -> Result<usize> {
        let prefix = format!("{content_type}_");
        let mut removed = 0;
        for entry in fs::read_dir(&self.directory)
            .with_context(|| format!("Failed to list {}", self.directory.display()))?
        {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if name.starts_with(&prefix) && name.ends_with(".json") {
                fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove {}", path.display()))?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Write one chunk record; returns the path written.
    pub fn write(&self, chunk: &Chunk) -> Result<PathBuf> {
        let path = self.directory.join(Self::file_name(chunk));
        let file =
            File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, chunk)?;
        } else {
            serde_json::to_writer(&mut writer, chunk)?;
        }
        writeln!(writer)?;
        writer.flush()?;
        Ok(path)
    }
}
