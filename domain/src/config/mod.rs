//! Presentation-facing configuration value objects
//!
//! Shared between the config file loader and the output layer.

mod output_format;

pub use output_format::OutputFormat;
