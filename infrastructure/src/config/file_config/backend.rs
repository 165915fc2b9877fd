//! Backend selection from TOML (`[backend]` section)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which implementation of the configuration library to bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// In-process reference implementation
    #[default]
    Memory,
    /// The linked `libenkf` (requires the `native` feature)
    Native,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Memory => "memory",
            BackendKind::Native => "native",
        }
    }

    /// Whether this build can bind the backend.
    pub fn is_available(&self) -> bool {
        match self {
            BackendKind::Memory => true,
            BackendKind::Native => cfg!(feature = "native"),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw backend configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    pub kind: BackendKind,
}
