//! Input handling module

pub mod file_reader;
pub mod front_matter;
pub mod glob_resolver;

pub use file_reader::FileReader;
pub use front_matter::{fallback_title, parse_front_matter, FrontMatter};
pub use glob_resolver::resolve_patterns;
