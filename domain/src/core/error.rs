//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field '{field}' expects a {expected} value, got {actual}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Invalid {kind} value: '{input}'")]
    InvalidValue { kind: &'static str, input: String },

    #[error("Invalid template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },
}

impl DomainError {
    /// Check if this error came from a malformed iteration template
    pub fn is_template_error(&self) -> bool {
        matches!(self, DomainError::InvalidTemplate { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mismatch_display() {
        let error = DomainError::TypeMismatch {
            field: "alpha",
            expected: "float",
            actual: "text",
        };
        assert_eq!(
            error.to_string(),
            "Field 'alpha' expects a float value, got text"
        );
    }

    #[test]
    fn test_is_template_error_check() {
        let error = DomainError::InvalidTemplate {
            template: "%s".to_string(),
            reason: "unsupported conversion".to_string(),
        };
        assert!(error.is_template_error());
        assert!(!DomainError::UnknownField("x".to_string()).is_template_error());
    }
}
