//! Process command implementation
//!
//! Discovers markdown files, parses front matter, chunks each document with
//! the core pipeline, writes one JSON file per chunk, and prints a summary.
//! Documents are independent, so the fan-out across them may be parallel;
//! chunk order within a document is always sequential.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use rayon::prelude::*;
use semchunk_core::{Chunk, ChunkProcessor, Document, DocumentMeta, StructureProfile};

use crate::config::CliConfig;
use crate::input::{fallback_title, parse_front_matter, resolve_patterns, FileReader};
use crate::output::{ChunkWriter, RunStats};
use crate::progress::ProgressReporter;

/// Arguments for the process command
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output directory for chunk files
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Structure profile
    #[arg(long, value_enum)]
    pub profile: Option<ProfileArg>,

    /// Maximum tokens per chunk
    #[arg(long, value_name = "N")]
    pub max_tokens: Option<usize>,

    /// Minimum tokens per chunk
    #[arg(long, value_name = "N")]
    pub min_tokens: Option<usize>,

    /// Tokens of overlap between adjacent chunks
    #[arg(long, value_name = "N", conflicts_with = "overlap_sentences")]
    pub overlap_tokens: Option<usize>,

    /// Sentences of overlap between adjacent chunks
    #[arg(long, value_name = "N")]
    pub overlap_sentences: Option<usize>,

    /// Id namespace for produced chunks
    #[arg(long, value_name = "TYPE")]
    pub content_type: Option<String>,

    /// Process documents in parallel
    #[arg(short, long)]
    pub parallel: bool,

    /// Worker threads for parallel processing (default: all cores)
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Structure profile choices
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ProfileArg {
    /// Heading, paragraph, then sentence boundaries
    Markdown,
    /// Paragraph, then sentence boundaries
    Plain,
    /// Symbol definitions, paragraph, then sentence boundaries
    Code,
}

impl From<ProfileArg> for StructureProfile {
    fn from(profile: ProfileArg) -> Self {
        match profile {
            ProfileArg::Markdown => StructureProfile::Markdown,
            ProfileArg::Plain => StructureProfile::Plain,
            ProfileArg::Code => StructureProfile::Code,
        }
    }
}

impl ProcessArgs {
    /// Execute the process command.
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        let config = self.effective_config()?;
        let chunk_config = config.to_chunk_config()?;
        let content_type = chunk_config.content_type.clone();

        log::info!("Starting chunking run");
        log::debug!("Configuration: {config:?}");

        let files = resolve_patterns(&self.input)?;
        log::info!("Resolved {} input file(s)", files.len());

        let writer = ChunkWriter::create(&config.output.directory, config.output.pretty)?;
        if config.output.clean_existing {
            let removed = writer.clean_existing(&content_type)?;
            if removed > 0 {
                log::info!("Removed {removed} stale chunk file(s)");
            }
        }

        let processor = ChunkProcessor::with_config(chunk_config);
        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_documents(files.len() as u64);

        let results: Vec<(PathBuf, Result<Vec<Chunk>>)> = if config.performance.parallel {
            let threads = config.performance.threads.unwrap_or_else(num_cpus::get);
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .context("Failed to build worker thread pool")?;
            pool.install(|| {
                files
                    .par_iter()
                    .map(|path| {
                        let result = process_one(path, &processor, &writer);
                        progress.document_completed(&path.display().to_string());
                        (path.clone(), result)
                    })
                    .collect()
            })
        } else {
            files
                .iter()
                .map(|path| {
                    let result = process_one(path, &processor, &writer);
                    progress.document_completed(&path.display().to_string());
                    (path.clone(), result)
                })
                .collect()
        };
        progress.finish();

        let mut stats = RunStats::default();
        for (path, result) in &results {
            match result {
                Ok(chunks) => stats.record_document(chunks),
                Err(err) => {
                    log::error!("{}: {err:#}", path.display());
                    stats.record_failure();
                }
            }
        }

        if !self.quiet {
            stats.print_summary();
        }
        Ok(())
    }

    /// Load the config file (or defaults) and apply flag overrides.
    fn effective_config(&self) -> Result<CliConfig> {
        let mut config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };

        if let Some(max) = self.max_tokens {
            config.chunking.max_chunk_tokens = max;
        }
        if let Some(min) = self.min_tokens {
            config.chunking.min_chunk_tokens = min;
        }
        if let Some(tokens) = self.overlap_tokens {
            config.chunking.overlap_tokens = Some(tokens);
            config.chunking.overlap_sentences = None;
        }
        if let Some(sentences) = self.overlap_sentences {
            config.chunking.overlap_sentences = Some(sentences);
        }
        if let Some(profile) = self.profile {
            config.chunking.structure_profile = profile.into();
        }
        if let Some(content_type) = &self.content_type {
            config.chunking.content_type = content_type.clone();
        }
        if let Some(output) = &self.output {
            config.output.directory = output.clone();
        }
        if self.parallel {
            config.performance.parallel = true;
        }
        if let Some(threads) = self.threads {
            config.performance.threads = Some(threads);
        }
        Ok(config)
    }

    /// Initialize logging based on verbosity level.
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        let _ = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(log_level),
        )
        .try_init();
    }
}

/// Chunk one document and persist its chunks.
///
/// A failure here is confined to this document; the caller records it and
/// the run continues.
fn process_one(path: &Path, processor: &ChunkProcessor, writer: &ChunkWriter) -> Result<Vec<Chunk>> {
    let raw = FileReader::read_text(path)?;
    let original_file_sha256 = FileReader::file_sha256(path)?;
    let (front, body) = parse_front_matter(&raw)
        .with_context(|| format!("in {}", path.display()))?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let title = front
        .title
        .clone()
        .or_else(|| fallback_title(body))
        .unwrap_or_else(|| stem.clone());
    let slug = front.slug.clone().unwrap_or_else(|| stem.clone());

    let meta = DocumentMeta {
        title,
        slug,
        date: front.date.clone(),
        tags: front.tags.clone(),
        source_url: front.source_url.clone(),
        path: Some(path.display().to_string()),
        original_file_sha256,
        image_alt_texts: front.image_alt_texts(),
    };

    let chunks = processor
        .process(&Document::new(body, meta))
        .with_context(|| format!("while chunking {}", path.display()))?;

    for chunk in &chunks {
        writer.write(chunk)?;
    }
    log::debug!("{}: {} chunk(s)", path.display(), chunks.len());
    Ok(chunks)
}
