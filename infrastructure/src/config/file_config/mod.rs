//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod backend;
mod iteration;
mod output;

pub use backend::{BackendKind, FileBackendConfig};
pub use iteration::FileIterationConfig;
pub use output::FileOutputConfig;

use super::keyword_file::KeywordConfig;
use enkf_iter_domain::{ConfigIssue, ConfigIssueCode, IterSettings, Severity};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Iteration record settings
    pub iteration: FileIterationConfig,
    /// Library backend selection
    pub backend: FileBackendConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Resolve the final settings: library defaults, then `[iteration]`,
    /// then the keyword config file if one was given.
    pub fn settings(&self, keywords: Option<&KeywordConfig>) -> IterSettings {
        let mut settings = self.iteration.to_settings();
        if let Some(keywords) = keywords {
            keywords.apply_to(&mut settings);
        }
        settings
    }

    /// Validate the configuration, returning all detected issues.
    ///
    /// It checks:
    /// 1. The resolved iteration settings
    /// 2. Warnings collected from the keyword config file
    /// 3. Whether the selected backend is compiled in
    pub fn validate(&self, keywords: Option<&KeywordConfig>) -> Vec<ConfigIssue> {
        self.validate_settings(&self.settings(keywords), keywords)
    }

    /// Validate `settings` resolved from this file (plus any later overrides)
    /// together with the keyword file warnings and the backend selection.
    pub fn validate_settings(
        &self,
        settings: &IterSettings,
        keywords: Option<&KeywordConfig>,
    ) -> Vec<ConfigIssue> {
        let mut issues = settings.validate();

        if let Some(keywords) = keywords {
            issues.extend(keywords.warnings.iter().cloned());
        }

        if !self.backend.kind.is_available() {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::BackendUnavailable {
                    backend: self.backend.kind.to_string(),
                },
                message: format!(
                    "backend.kind = \"{}\" requires building with the `native` feature",
                    self.backend.kind
                ),
            });
        }

        issues
    }
}
