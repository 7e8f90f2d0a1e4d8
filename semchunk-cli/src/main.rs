//! semchunk command-line entry point

use clap::{Parser, Subcommand};
use semchunk_cli::commands::{GenerateConfigArgs, ProcessArgs, ValidateArgs};

/// Chunk markdown documents into embedding-ready JSON records
#[derive(Debug, Parser)]
#[command(name = "semchunk", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Chunk documents and write one JSON record per chunk
    Process(ProcessArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
    /// Write the default configuration as TOML
    GenerateConfig(GenerateConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Process(args) => args.execute(),
        Commands::Validate(args) => args.execute(),
        Commands::GenerateConfig(args) => args.execute(),
    };

    if let Err(err) = result {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
