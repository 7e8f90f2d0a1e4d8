//! semchunk CLI library
//!
//! This library provides the command-line interface around the
//! `semchunk-core` chunking pipeline: file discovery, front-matter parsing,
//! JSON-per-chunk persistence, and run statistics.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
