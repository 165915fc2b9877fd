//! Output formatter trait

use enkf_iter_application::{IterSettingsSnapshot, IterationPlan};
use enkf_iter_domain::{ConfigIssue, FieldValue, IterField};

/// Trait for rendering command results
pub trait OutputFormatter {
    /// Every field of a record
    fn format_snapshot(&self, snapshot: &IterSettingsSnapshot) -> String;

    /// A single field; `None` when the library holds no value
    fn format_value(&self, field: IterField, value: Option<&FieldValue>) -> String;

    /// The known field keys
    fn format_keys(&self, fields: &[IterField]) -> String;

    /// Per-iteration case and run path names
    fn format_plan(&self, plan: &[IterationPlan]) -> String;

    /// Validation issues
    fn format_issues(&self, issues: &[ConfigIssue]) -> String;
}
