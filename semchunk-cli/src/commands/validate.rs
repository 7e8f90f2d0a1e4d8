//! Validate command implementation

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::config::CliConfig;
use crate::input::resolve_patterns;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Configuration file to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub config: PathBuf,

    /// Also check that these input patterns resolve to files
    #[arg(short, long, value_name = "FILE/PATTERN")]
    pub input: Vec<String>,
}

impl ValidateArgs {
    /// Execute the validate command.
    pub fn execute(&self) -> Result<()> {
        let config = CliConfig::load(&self.config)?;
        let chunk_config = config.to_chunk_config()?;

        println!("✓ Configuration is valid: {}", self.config.display());
        println!(
            "  max {} / min {} tokens, overlap {:?}, profile {:?}",
            chunk_config.max_chunk_tokens,
            chunk_config.min_chunk_tokens,
            chunk_config.overlap,
            chunk_config.structure_profile,
        );
        println!("  output directory: {}", config.output.directory.display());

        if !self.input.is_empty() {
            let files = resolve_patterns(&self.input)?;
            println!("✓ Input patterns match {} file(s)", files.len());
        }

        Ok(())
    }
}
