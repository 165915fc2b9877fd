//! Iteration settings from TOML (`[iteration]` section)

use enkf_iter_domain::IterSettings;
use serde::{Deserialize, Serialize};

/// Raw iteration configuration from TOML.
///
/// Every key is optional; unset keys keep the library default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileIterationConfig {
    pub rerun: Option<bool>,
    pub rerun_start: Option<i32>,
    pub log_path: Option<String>,
    pub alpha: Option<f64>,
    pub merge_observations: Option<bool>,
    pub num_iterations: Option<i32>,
    pub case_fmt: Option<String>,
    pub runpath_fmt: Option<String>,
}

impl FileIterationConfig {
    /// Overlay the configured keys onto `settings`.
    pub fn apply_to(&self, settings: &mut IterSettings) {
        if let Some(rerun) = self.rerun {
            settings.rerun = rerun;
        }
        if let Some(start) = self.rerun_start {
            settings.rerun_start = start;
        }
        if let Some(path) = &self.log_path {
            settings.log_path = path.clone();
        }
        if let Some(alpha) = self.alpha {
            settings.alpha = alpha;
        }
        if let Some(merge) = self.merge_observations {
            settings.merge_observations = merge;
        }
        if let Some(n) = self.num_iterations {
            settings.num_iterations = n;
        }
        if let Some(fmt) = &self.case_fmt {
            settings.case_fmt = fmt.clone();
        }
        if let Some(fmt) = &self.runpath_fmt {
            settings.runpath_fmt = fmt.clone();
        }
    }

    /// Library defaults with the configured keys applied.
    pub fn to_settings(&self) -> IterSettings {
        let mut settings = IterSettings::default();
        self.apply_to(&mut settings);
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_overlay_keeps_defaults() {
        let config: FileIterationConfig = toml::from_str(
            r#"
num_iterations = 6
case_fmt = "case_%d"
"#,
        )
        .unwrap();
        let settings = config.to_settings();
        assert_eq!(settings.num_iterations, 6);
        assert_eq!(settings.case_fmt, "case_%d");
        assert_eq!(settings.runpath_fmt, IterSettings::default().runpath_fmt);
        assert_eq!(settings.alpha, IterSettings::default().alpha);
    }

    #[test]
    fn test_empty_is_defaults() {
        assert_eq!(
            FileIterationConfig::default().to_settings(),
            IterSettings::default()
        );
    }
}
