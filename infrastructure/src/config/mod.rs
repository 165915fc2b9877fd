//! Configuration loading for enkf-iter
//!
//! Two kinds of input feed the iteration settings:
//!
//! - Layered TOML (`enkf-iter.toml`), merged by [`IterConfigLoader`]:
//!   defaults, global, project, `--config`, then `ENKF_ITER_*` environment
//! - An ERT keyword file (`ITER_COUNT 4`, `ITER_CASE case_%d`, ...) read by
//!   [`KeywordConfig`], which overrides the TOML `[iteration]` section

mod file_config;
mod keyword_file;
mod loader;

pub use file_config::{
    BackendKind, FileBackendConfig, FileConfig, FileIterationConfig, FileOutputConfig,
};
pub use keyword_file::{KeywordConfig, KeywordFileError};
pub use loader::{ConfigLoadError, IterConfigLoader, LoadedConfig};
