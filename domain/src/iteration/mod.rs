//! Analysis iteration configuration: fields, values, settings and templates.
//!
//! - [`field::IterField`]: the fixed field set of the record
//! - [`value::FieldValue`]: a typed value of one field
//! - [`settings::IterSettings`]: a full copy of all fields with library defaults
//! - [`template`]: per-iteration case and run path naming
//! - [`validation`]: checks applied to configured settings

pub mod field;
pub mod settings;
pub mod template;
pub mod validation;
pub mod value;
