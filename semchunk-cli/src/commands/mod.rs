//! Command implementations

pub mod generate_config;
pub mod process;
pub mod validate;

pub use generate_config::GenerateConfigArgs;
pub use process::ProcessArgs;
pub use validate::ValidateArgs;
