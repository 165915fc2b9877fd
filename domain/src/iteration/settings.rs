//! Iteration settings value object.
//!
//! [`IterSettings`] is a plain, fully-populated copy of the eight fields of
//! the analysis iteration configuration record. It is what config files
//! produce and what gets pushed into (or read back from) a live record.

use super::field::IterField;
use super::value::FieldValue;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_RERUN: bool = false;
pub const DEFAULT_RERUN_START: i32 = 0;
pub const DEFAULT_LOG_PATH: &str = "update_log";
pub const DEFAULT_ALPHA: f64 = 1.5;
pub const DEFAULT_MERGE_OBSERVATIONS: bool = false;
pub const DEFAULT_NUM_ITERATIONS: i32 = 4;
pub const DEFAULT_CASE_FMT: &str = "ITERATED_ENSEMBLE_SMOOTHER%d";
pub const DEFAULT_RUNPATH_FMT: &str = "iter%d";

/// All fields of one analysis iteration configuration record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterSettings {
    pub rerun: bool,
    pub rerun_start: i32,
    pub log_path: String,
    pub alpha: f64,
    pub merge_observations: bool,
    pub num_iterations: i32,
    pub case_fmt: String,
    pub runpath_fmt: String,
}

impl Default for IterSettings {
    fn default() -> Self {
        Self {
            rerun: DEFAULT_RERUN,
            rerun_start: DEFAULT_RERUN_START,
            log_path: DEFAULT_LOG_PATH.to_string(),
            alpha: DEFAULT_ALPHA,
            merge_observations: DEFAULT_MERGE_OBSERVATIONS,
            num_iterations: DEFAULT_NUM_ITERATIONS,
            case_fmt: DEFAULT_CASE_FMT.to_string(),
            runpath_fmt: DEFAULT_RUNPATH_FMT.to_string(),
        }
    }
}

impl IterSettings {
    /// Read a field as a tagged value.
    pub fn get(&self, field: IterField) -> FieldValue {
        match field {
            IterField::Rerun => FieldValue::Boolean(self.rerun),
            IterField::RerunStart => FieldValue::Integer(self.rerun_start),
            IterField::LogPath => FieldValue::Text(self.log_path.clone()),
            IterField::Alpha => FieldValue::Float(self.alpha),
            IterField::MergeObservations => FieldValue::Boolean(self.merge_observations),
            IterField::NumIterations => FieldValue::Integer(self.num_iterations),
            IterField::CaseFmt => FieldValue::Text(self.case_fmt.clone()),
            IterField::RunpathFmt => FieldValue::Text(self.runpath_fmt.clone()),
        }
    }

    /// Write a field from a tagged value. The value kind must match the field.
    pub fn set(&mut self, field: IterField, value: FieldValue) -> Result<(), DomainError> {
        let mismatch = |value: &FieldValue| DomainError::TypeMismatch {
            field: field.key(),
            expected: field.kind().as_str(),
            actual: value.kind().as_str(),
        };

        match (field, value) {
            (IterField::Rerun, FieldValue::Boolean(b)) => self.rerun = b,
            (IterField::RerunStart, FieldValue::Integer(n)) => self.rerun_start = n,
            (IterField::LogPath, FieldValue::Text(s)) => self.log_path = s,
            (IterField::Alpha, FieldValue::Float(x)) => self.alpha = x,
            (IterField::Alpha, FieldValue::Integer(n)) => self.alpha = f64::from(n),
            (IterField::MergeObservations, FieldValue::Boolean(b)) => self.merge_observations = b,
            (IterField::NumIterations, FieldValue::Integer(n)) => self.num_iterations = n,
            (IterField::CaseFmt, FieldValue::Text(s)) => self.case_fmt = s,
            (IterField::RunpathFmt, FieldValue::Text(s)) => self.runpath_fmt = s,
            (_, other) => return Err(mismatch(&other)),
        }
        Ok(())
    }

    /// Restore one field to its library default.
    pub fn reset(&mut self, field: IterField) {
        let defaults = IterSettings::default();
        // Kinds always match between two IterSettings
        let _ = self.set(field, defaults.get(field));
    }

    // ==================== Builder Methods ====================

    pub fn with_num_iterations(mut self, n: i32) -> Self {
        self.num_iterations = n;
        self
    }

    pub fn with_case_fmt(mut self, fmt: impl Into<String>) -> Self {
        self.case_fmt = fmt.into();
        self
    }

    pub fn with_runpath_fmt(mut self, fmt: impl Into<String>) -> Self {
        self.runpath_fmt = fmt.into();
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_rerun(mut self, rerun: bool, start: i32) -> Self {
        self.rerun = rerun;
        self.rerun_start = start;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = IterSettings::default();
        assert!(!settings.rerun);
        assert_eq!(settings.rerun_start, 0);
        assert_eq!(settings.num_iterations, 4);
        assert_eq!(settings.case_fmt, "ITERATED_ENSEMBLE_SMOOTHER%d");
        assert_eq!(settings.runpath_fmt, "iter%d");
    }

    #[test]
    fn test_get_set_every_field() {
        let mut settings = IterSettings::default();
        let values = [
            (IterField::Rerun, FieldValue::Boolean(true)),
            (IterField::RerunStart, FieldValue::Integer(12)),
            (IterField::LogPath, FieldValue::from("/tmp/log")),
            (IterField::Alpha, FieldValue::Float(0.25)),
            (IterField::MergeObservations, FieldValue::Boolean(true)),
            (IterField::NumIterations, FieldValue::Integer(6)),
            (IterField::CaseFmt, FieldValue::from("case_%d")),
            (IterField::RunpathFmt, FieldValue::from("run_%d")),
        ];
        for (field, value) in values {
            settings.set(field, value.clone()).unwrap();
            assert_eq!(settings.get(field), value);
        }
    }

    #[test]
    fn test_set_wrong_kind_is_rejected() {
        let mut settings = IterSettings::default();
        let err = settings
            .set(IterField::NumIterations, FieldValue::from("four"))
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::TypeMismatch {
                field: "num_iterations",
                ..
            }
        ));
        assert_eq!(settings.num_iterations, DEFAULT_NUM_ITERATIONS);
    }

    #[test]
    fn test_alpha_accepts_integer() {
        let mut settings = IterSettings::default();
        settings.set(IterField::Alpha, FieldValue::Integer(2)).unwrap();
        assert_eq!(settings.alpha, 2.0);
    }

    #[test]
    fn test_reset_restores_default() {
        let mut settings = IterSettings::default().with_case_fmt("x%d");
        settings.reset(IterField::CaseFmt);
        assert_eq!(settings.case_fmt, DEFAULT_CASE_FMT);
    }

    #[test]
    fn test_builder() {
        let settings = IterSettings::default()
            .with_num_iterations(10)
            .with_rerun(true, 5)
            .with_alpha(3.0);
        assert_eq!(settings.num_iterations, 10);
        assert!(settings.rerun);
        assert_eq!(settings.rerun_start, 5);
        assert_eq!(settings.alpha, 3.0);
    }
}
