//! Presentation layer for enkf-iter
//!
//! This crate contains CLI definitions and output formatters.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{BackendChoice, Cli, Command, OutputArg};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
