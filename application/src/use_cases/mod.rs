//! Use cases
//!
//! Application-level operations over a proxied record.

pub mod apply_settings;
pub mod plan_iterations;
pub mod snapshot;
