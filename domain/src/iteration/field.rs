//! Field registry for the analysis iteration configuration record.
//!
//! The record owned by the external library has a fixed set of typed
//! slots. Each [`IterField`] carries the metadata the other layers need:
//! the runtime key, the value kind, and the keyword used in classic
//! keyword-per-line config files.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The primitive type of a field as it crosses the library boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Boolean,
    Integer,
    Float,
    Text,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Boolean => "boolean",
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::Text => "text",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named slot of the analysis iteration configuration record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IterField {
    /// Whether a rerun is requested
    Rerun,
    /// Starting report step for a rerun
    RerunStart,
    /// Directory the update step writes its log to
    LogPath,
    /// Outlier truncation parameter of the analysis
    Alpha,
    /// Whether observations are merged across report steps
    MergeObservations,
    /// Number of iterations of the iterated smoother
    NumIterations,
    /// Template for naming the case of each iteration
    CaseFmt,
    /// Template for naming the run path of each iteration
    RunpathFmt,
}

/// Metadata for a single field.
#[derive(Debug, Clone)]
pub struct FieldInfo {
    pub field: IterField,
    /// Runtime key (e.g., `"num_iterations"`).
    pub key: &'static str,
    /// Keyword in keyword-per-line config files (e.g., `"ITER_COUNT"`).
    pub keyword: &'static str,
    pub kind: FieldKind,
    /// Human-readable description.
    pub description: &'static str,
}

impl IterField {
    /// Every field, in record order.
    pub const ALL: [IterField; 8] = [
        IterField::Rerun,
        IterField::RerunStart,
        IterField::LogPath,
        IterField::Alpha,
        IterField::MergeObservations,
        IterField::NumIterations,
        IterField::CaseFmt,
        IterField::RunpathFmt,
    ];

    pub fn info(&self) -> &'static FieldInfo {
        // FIELDS is laid out in the same order as ALL
        &FIELDS[*self as usize]
    }

    pub fn key(&self) -> &'static str {
        self.info().key
    }

    pub fn keyword(&self) -> &'static str {
        self.info().keyword
    }

    pub fn kind(&self) -> FieldKind {
        self.info().kind
    }

    /// Look up a field by its config-file keyword (case-sensitive, as in the library).
    pub fn from_keyword(keyword: &str) -> Option<IterField> {
        FIELDS.iter().find(|f| f.keyword == keyword).map(|f| f.field)
    }
}

impl fmt::Display for IterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for IterField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup_field(s)
            .map(|info| info.field)
            .ok_or_else(|| DomainError::UnknownField(s.to_string()))
    }
}

/// All known fields with their metadata.
pub fn known_fields() -> &'static [FieldInfo] {
    &FIELDS
}

/// Look up a field by its runtime key.
pub fn lookup_field(key: &str) -> Option<&'static FieldInfo> {
    FIELDS.iter().find(|f| f.key == key)
}

static FIELDS: [FieldInfo; 8] = [
    FieldInfo {
        field: IterField::Rerun,
        key: "rerun",
        keyword: "ENKF_RERUN",
        kind: FieldKind::Boolean,
        description: "Request a rerun of the ensemble",
    },
    FieldInfo {
        field: IterField::RerunStart,
        key: "rerun_start",
        keyword: "RERUN_START",
        kind: FieldKind::Integer,
        description: "Report step the rerun starts from",
    },
    FieldInfo {
        field: IterField::LogPath,
        key: "log_path",
        keyword: "UPDATE_LOG_PATH",
        kind: FieldKind::Text,
        description: "Directory for update step logs",
    },
    FieldInfo {
        field: IterField::Alpha,
        key: "alpha",
        keyword: "ENKF_ALPHA",
        kind: FieldKind::Float,
        description: "Outlier truncation parameter",
    },
    FieldInfo {
        field: IterField::MergeObservations,
        key: "merge_observations",
        keyword: "ENKF_MERGE_OBSERVATIONS",
        kind: FieldKind::Boolean,
        description: "Merge observations across report steps",
    },
    FieldInfo {
        field: IterField::NumIterations,
        key: "num_iterations",
        keyword: "ITER_COUNT",
        kind: FieldKind::Integer,
        description: "Number of smoother iterations",
    },
    FieldInfo {
        field: IterField::CaseFmt,
        key: "case_fmt",
        keyword: "ITER_CASE",
        kind: FieldKind::Text,
        description: "Case name template, e.g. ITERATED_ENSEMBLE_SMOOTHER%d",
    },
    FieldInfo {
        field: IterField::RunpathFmt,
        key: "runpath_fmt",
        keyword: "ITER_RUNPATH",
        kind: FieldKind::Text,
        description: "Run path template, e.g. iter%d",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_matches_enum_order() {
        for field in IterField::ALL {
            assert_eq!(field.info().field, field);
        }
    }

    #[test]
    fn test_lookup_existing_key() {
        let info = lookup_field("num_iterations").unwrap();
        assert_eq!(info.field, IterField::NumIterations);
        assert_eq!(info.kind, FieldKind::Integer);
        assert_eq!(info.keyword, "ITER_COUNT");
    }

    #[test]
    fn test_lookup_nonexistent_key() {
        assert!(lookup_field("nonexistent").is_none());
        assert!("nonexistent".parse::<IterField>().is_err());
    }

    #[test]
    fn test_from_keyword() {
        assert_eq!(IterField::from_keyword("ITER_CASE"), Some(IterField::CaseFmt));
        assert_eq!(
            IterField::from_keyword("ITER_RUNPATH"),
            Some(IterField::RunpathFmt)
        );
        assert_eq!(IterField::from_keyword("iter_case"), None);
    }

    #[test]
    fn test_case_and_runpath_are_distinct_fields() {
        assert_ne!(IterField::CaseFmt.key(), IterField::RunpathFmt.key());
        assert_ne!(IterField::CaseFmt.keyword(), IterField::RunpathFmt.keyword());
    }

    #[test]
    fn test_text_fields() {
        let text: Vec<_> = known_fields()
            .iter()
            .filter(|f| f.kind == FieldKind::Text)
            .map(|f| f.key)
            .collect();
        assert_eq!(text, vec!["log_path", "case_fmt", "runpath_fmt"]);
    }
}
