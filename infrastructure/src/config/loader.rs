//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use super::keyword_file::{KeywordConfig, KeywordFileError};
use enkf_iter_domain::{ConfigIssue, DomainError, FieldValue, IterField, IterSettings};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const APP_DIR: &str = "enkf-iter";
const PROJECT_FILES: [&str; 2] = ["enkf-iter.toml", ".enkf-iter.toml"];
const ENV_PREFIX: &str = "ENKF_ITER_";

/// Errors raised while gathering configuration sources
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("Invalid configuration: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error(transparent)]
    Keyword(#[from] KeywordFileError),
}

/// TOML configuration plus the optional keyword file layered on top.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub file: FileConfig,
    pub keywords: Option<KeywordConfig>,
    /// `KEY=VALUE` overrides, applied last.
    pub overrides: Vec<(IterField, FieldValue)>,
}

impl LoadedConfig {
    /// Parse `KEY=VALUE` pairs and queue them after every file source.
    /// Later pairs for the same key win.
    pub fn add_overrides(&mut self, pairs: &[(String, String)]) -> Result<(), DomainError> {
        for (key, raw) in pairs {
            let field: IterField = key.parse()?;
            let value = FieldValue::parse(field.kind(), raw)?;
            self.overrides.push((field, value));
        }
        Ok(())
    }

    /// Final iteration settings from every source.
    pub fn settings(&self) -> Result<IterSettings, DomainError> {
        let mut settings = self.file.settings(self.keywords.as_ref());
        for (field, value) in &self.overrides {
            settings.set(*field, value.clone())?;
        }
        Ok(settings)
    }

    /// Validate the final settings, overrides included.
    pub fn validate(&self) -> Result<Vec<ConfigIssue>, DomainError> {
        let settings = self.settings()?;
        Ok(self
            .file
            .validate_settings(&settings, self.keywords.as_ref()))
    }
}

/// Configuration loader that handles file discovery and merging
pub struct IterConfigLoader;

impl IterConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `ENKF_ITER_<SECTION>__<KEY>` (e.g. `ENKF_ITER_ITERATION__ALPHA`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./enkf-iter.toml` or `./.enkf-iter.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/enkf-iter/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            debug!("Loading project config {}", path.display());
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            debug!("Loading explicit config {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load TOML sources (or only defaults with `no_config`) and the keyword
    /// file, if one was named.
    pub fn load_all(
        config_path: Option<&PathBuf>,
        no_config: bool,
        keyword_path: Option<&Path>,
    ) -> Result<LoadedConfig, ConfigLoadError> {
        let file = if no_config {
            Self::load_defaults()
        } else {
            Self::load(config_path)?
        };

        let keywords = keyword_path.map(KeywordConfig::from_file).transpose()?;

        Ok(LoadedConfig {
            file,
            keywords,
            overrides: Vec::new(),
        })
    }

    /// Load a single TOML file on top of the defaults, ignoring every other source.
    pub fn load_file(path: &Path) -> Result<FileConfig, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/enkf-iter/config.toml if set,
    /// otherwise falls back to the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] Environment: {}*", ENV_PREFIX);

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:5}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./{} or ./{}", PROJECT_FILES[0], PROJECT_FILES[1]);
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}
