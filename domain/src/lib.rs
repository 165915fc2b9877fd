//! Domain layer for enkf-iter
//!
//! This crate contains the value objects describing the analysis iteration
//! configuration record of the ensemble smoother library. It has no
//! dependencies on the library itself or on presentation concerns.
//!
//! # Core Concepts
//!
//! ## Fields
//!
//! The record has a fixed set of typed slots ([`IterField`]): rerun flag,
//! rerun start, log path, alpha, merge-observations flag, number of
//! iterations, case format and run path format.
//!
//! ## Iteration templates
//!
//! Case and run path formats are printf-style templates rendered once per
//! iteration (`ITERATED_ENSEMBLE_SMOOTHER%d` → `ITERATED_ENSEMBLE_SMOOTHER2`).

pub mod config;
pub mod core;
pub mod iteration;

// Re-export commonly used types
pub use config::OutputFormat;
pub use core::error::DomainError;
pub use iteration::{
    field::{FieldInfo, FieldKind, IterField, known_fields, lookup_field},
    settings::IterSettings,
    template::{check_template, render_iteration, template_has_placeholder},
    validation::{ConfigIssue, ConfigIssueCode, Severity, has_errors},
    value::FieldValue,
};
