//! Snapshot use case.
//!
//! Reads every field of a live record into an owned value, for display or
//! serialization.

use crate::iter_config::proxy::AnalysisIterConfig;
use crate::ports::iter_config_backend::{BoundaryError, IterConfigBackend};
use enkf_iter_domain::{FieldValue, IterField, IterSettings};
use serde::Serialize;

/// Field values read from a record at one point in time.
///
/// Text fields are `None` when the library holds no string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IterSettingsSnapshot {
    pub rerun: bool,
    pub rerun_start: i32,
    pub log_path: Option<String>,
    pub alpha: f64,
    pub merge_observations: bool,
    pub num_iterations: i32,
    pub case_fmt: Option<String>,
    pub runpath_fmt: Option<String>,
}

impl IterSettingsSnapshot {
    /// Field/value pairs in record order.
    pub fn entries(&self) -> Vec<(IterField, Option<FieldValue>)> {
        IterField::ALL
            .iter()
            .map(|&field| (field, self.get(field)))
            .collect()
    }

    pub fn get(&self, field: IterField) -> Option<FieldValue> {
        match field {
            IterField::Rerun => Some(FieldValue::Boolean(self.rerun)),
            IterField::RerunStart => Some(FieldValue::Integer(self.rerun_start)),
            IterField::LogPath => self.log_path.clone().map(FieldValue::Text),
            IterField::Alpha => Some(FieldValue::Float(self.alpha)),
            IterField::MergeObservations => Some(FieldValue::Boolean(self.merge_observations)),
            IterField::NumIterations => Some(FieldValue::Integer(self.num_iterations)),
            IterField::CaseFmt => self.case_fmt.clone().map(FieldValue::Text),
            IterField::RunpathFmt => self.runpath_fmt.clone().map(FieldValue::Text),
        }
    }
}

impl From<IterSettings> for IterSettingsSnapshot {
    fn from(settings: IterSettings) -> Self {
        Self {
            rerun: settings.rerun,
            rerun_start: settings.rerun_start,
            log_path: Some(settings.log_path),
            alpha: settings.alpha,
            merge_observations: settings.merge_observations,
            num_iterations: settings.num_iterations,
            case_fmt: Some(settings.case_fmt),
            runpath_fmt: Some(settings.runpath_fmt),
        }
    }
}

/// Use case for reading every field of a record.
pub struct SnapshotUseCase;

impl SnapshotUseCase {
    pub fn execute<B: IterConfigBackend>(
        config: &AnalysisIterConfig<'_, B>,
    ) -> Result<IterSettingsSnapshot, BoundaryError> {
        Ok(IterSettingsSnapshot {
            rerun: config.rerun(),
            rerun_start: config.rerun_start(),
            log_path: config.log_path()?,
            alpha: config.alpha(),
            merge_observations: config.merge_observations(),
            num_iterations: config.num_iterations(),
            case_fmt: config.case_fmt()?,
            runpath_fmt: config.runpath_fmt()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingBackend;
    use std::sync::Arc;

    #[test]
    fn test_snapshot_of_fresh_record_matches_defaults() {
        let config = AnalysisIterConfig::alloc(Arc::new(RecordingBackend::default())).unwrap();
        let snapshot = SnapshotUseCase::execute(&config).unwrap();
        assert_eq!(snapshot, IterSettingsSnapshot::from(IterSettings::default()));
    }

    #[test]
    fn test_entries_in_record_order() {
        let snapshot = IterSettingsSnapshot::from(IterSettings::default());
        let entries = snapshot.entries();
        assert_eq!(entries.len(), 8);
        assert_eq!(entries[0].0, IterField::Rerun);
        assert_eq!(entries[7].0, IterField::RunpathFmt);
        assert_eq!(entries[5].1, Some(FieldValue::Integer(4)));
    }

    #[test]
    fn test_snapshot_serializes_missing_text_as_null() {
        let mut snapshot = IterSettingsSnapshot::from(IterSettings::default());
        snapshot.log_path = None;
        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json["log_path"].is_null());
        assert_eq!(json["num_iterations"], 4);
    }
}
