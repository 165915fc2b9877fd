//! Validation of configured iteration settings.
//!
//! The record itself accepts anything; these checks run on settings that
//! come from config files before they are pushed into a record, and
//! return structured issues with severity levels.
//!
//! # Examples
//!
//! ```
//! use enkf_iter_domain::IterSettings;
//!
//! let issues = IterSettings::default().validate();
//! assert!(issues.is_empty());
//! ```

use super::field::IterField;
use super::settings::IterSettings;
use super::template::{check_template, template_has_placeholder};
use serde::Serialize;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// Fewer than one iteration requested.
    NoIterations,
    /// Rerun start index is negative.
    NegativeRerunStart,
    /// Alpha must be positive to truncate anything.
    NonPositiveAlpha,
    /// Template contains an unsupported or repeated conversion.
    InvalidTemplate { field: IterField },
    /// Template renders the same name for every iteration.
    TemplateWithoutPlaceholder { field: IterField },
    /// Log path is empty.
    EmptyLogPath,
    /// Keyword not recognized in a keyword config file.
    UnknownKeyword { keyword: String },
    /// Configured backend is not compiled into this build.
    BackendUnavailable { backend: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

/// Check whether any issues are errors (i.e. fatal).
pub fn has_errors(issues: &[ConfigIssue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}

impl IterSettings {
    /// Validate the settings. An empty list means they are usable as-is.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.num_iterations < 1 {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::NoIterations,
                message: format!(
                    "num_iterations must be at least 1, got {}",
                    self.num_iterations
                ),
            });
        }

        if self.rerun_start < 0 {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::NegativeRerunStart,
                message: format!("rerun_start must not be negative, got {}", self.rerun_start),
            });
        }

        if self.alpha <= 0.0 || self.alpha.is_nan() {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::NonPositiveAlpha,
                message: format!(
                    "alpha is {}, outlier truncation is effectively disabled",
                    self.alpha
                ),
            });
        }

        if self.log_path.trim().is_empty() {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::EmptyLogPath,
                message: "log_path is empty, update logs go to the working directory"
                    .to_string(),
            });
        }

        for (field, template) in [
            (IterField::CaseFmt, &self.case_fmt),
            (IterField::RunpathFmt, &self.runpath_fmt),
        ] {
            if let Err(e) = check_template(template) {
                issues.push(ConfigIssue {
                    severity: Severity::Error,
                    code: ConfigIssueCode::InvalidTemplate { field },
                    message: format!("{}: {}", field.key(), e),
                });
            } else if !template_has_placeholder(template) {
                issues.push(ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::TemplateWithoutPlaceholder { field },
                    message: format!(
                        "{}: '{}' has no %d, every iteration gets the same name",
                        field.key(),
                        template
                    ),
                });
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(IterSettings::default().validate().is_empty());
    }

    #[test]
    fn zero_iterations_is_error() {
        let issues = IterSettings::default().with_num_iterations(0).validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert_eq!(issues[0].code, ConfigIssueCode::NoIterations);
        assert!(has_errors(&issues));
    }

    #[test]
    fn negative_rerun_start_is_error() {
        let issues = IterSettings::default().with_rerun(true, -1).validate();
        assert_eq!(issues[0].code, ConfigIssueCode::NegativeRerunStart);
    }

    #[test]
    fn zero_alpha_warns() {
        let issues = IterSettings::default().with_alpha(0.0).validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert!(!has_errors(&issues));
    }

    #[test]
    fn bad_template_is_error() {
        let issues = IterSettings::default().with_case_fmt("case_%s").validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].code,
            ConfigIssueCode::InvalidTemplate {
                field: IterField::CaseFmt
            }
        );
    }

    #[test]
    fn template_without_placeholder_warns() {
        let issues = IterSettings::default().with_runpath_fmt("runs").validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(
            issues[0].code,
            ConfigIssueCode::TemplateWithoutPlaceholder {
                field: IterField::RunpathFmt
            }
        );
    }

    #[test]
    fn has_errors_returns_false_for_empty() {
        let issues: Vec<ConfigIssue> = vec![];
        assert!(!has_errors(&issues));
    }
}
