//! Runtime configuration access port.
//!
//! Provides a uniform interface for reading and writing record fields by
//! key at runtime. Used by the CLI `get`/`--set` handling.

use super::iter_config_backend::BoundaryError;
use enkf_iter_domain::FieldValue;
use thiserror::Error;

/// Errors from config access operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigAccessError {
    /// The key is not recognized.
    #[error("unknown config key: {key}")]
    UnknownKey { key: String },

    /// The provided value has the wrong type for this key.
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// The library holds no value for this key.
    #[error("config key '{key}' is not set")]
    Unset { key: String },

    #[error(transparent)]
    Boundary(#[from] BoundaryError),
}

/// Port for runtime config access.
///
/// Implementors provide get/set for the known record fields. Only the value
/// kind is checked; the value itself is forwarded untouched.
pub trait ConfigAccessorPort {
    /// Get the current value of a config key.
    fn config_get(&self, key: &str) -> Result<FieldValue, ConfigAccessError>;

    /// Set a config key to a new value.
    fn config_set(&self, key: &str, value: FieldValue) -> Result<(), ConfigAccessError>;

    /// List all known config key names.
    fn config_keys(&self) -> Vec<String>;
}
