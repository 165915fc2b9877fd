//! Infrastructure layer for enkf-iter
//!
//! Adapters behind the application ports: the capability-table backends
//! (in-memory reference and the linked `libenkf`), plus configuration
//! file loading.

pub mod backends;
pub mod config;

pub use backends::{InMemoryIterConfigBackend, MemoryHandle};
#[cfg(feature = "native")]
pub use backends::{NativeHandle, NativeIterConfigBackend};
pub use config::{
    BackendKind, FileBackendConfig, FileConfig, FileIterationConfig, FileOutputConfig,
    ConfigLoadError, IterConfigLoader, KeywordConfig, KeywordFileError, LoadedConfig,
};
