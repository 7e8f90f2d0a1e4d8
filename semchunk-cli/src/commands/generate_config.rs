//! Generate-config command implementation

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::config::CliConfig;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command.
    pub fn execute(&self) -> Result<()> {
        let template = CliConfig::default_toml();

        match &self.output {
            Some(path) => {
                std::fs::write(path, &template)
                    .with_context(|| format!("Failed to write to {}", path.display()))?;
                println!("✓ Default configuration written to {}", path.display());
                println!();
                println!("Next steps:");
                println!("1. Adjust token budgets and overlap for your corpus");
                println!("2. Validate it: semchunk validate --config {}", path.display());
                println!(
                    "3. Use it: semchunk process -i 'blog/**/*.md' --config {}",
                    path.display()
                );
            }
            None => print!("{template}"),
        }

        Ok(())
    }
}
