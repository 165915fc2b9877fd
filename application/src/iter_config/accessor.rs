//! Key-based access to a proxied record.

use super::proxy::AnalysisIterConfig;
use crate::ports::config_accessor::{ConfigAccessError, ConfigAccessorPort};
use crate::ports::iter_config_backend::IterConfigBackend;
use enkf_iter_domain::{FieldValue, IterField, known_fields};

impl<B: IterConfigBackend> AnalysisIterConfig<'_, B> {
    /// Read one field as a tagged value. `None` when the library holds no text.
    pub fn get_field(&self, field: IterField) -> Result<Option<FieldValue>, ConfigAccessError> {
        let value = match field {
            IterField::Rerun => Some(FieldValue::Boolean(self.rerun())),
            IterField::RerunStart => Some(FieldValue::Integer(self.rerun_start())),
            IterField::LogPath => self.log_path()?.map(FieldValue::Text),
            IterField::Alpha => Some(FieldValue::Float(self.alpha())),
            IterField::MergeObservations => Some(FieldValue::Boolean(self.merge_observations())),
            IterField::NumIterations => Some(FieldValue::Integer(self.num_iterations())),
            IterField::CaseFmt => self.case_fmt()?.map(FieldValue::Text),
            IterField::RunpathFmt => self.runpath_fmt()?.map(FieldValue::Text),
        };
        Ok(value)
    }

    /// Write one field from a tagged value. Only the kind is checked.
    pub fn set_field(&self, field: IterField, value: FieldValue) -> Result<(), ConfigAccessError> {
        match (field, &value) {
            (IterField::Rerun, FieldValue::Boolean(b)) => self.set_rerun(*b),
            (IterField::RerunStart, FieldValue::Integer(n)) => self.set_rerun_start(*n),
            (IterField::LogPath, FieldValue::Text(s)) => self.set_log_path(s)?,
            (IterField::Alpha, FieldValue::Float(x)) => self.set_alpha(*x),
            (IterField::Alpha, FieldValue::Integer(n)) => self.set_alpha(f64::from(*n)),
            (IterField::MergeObservations, FieldValue::Boolean(b)) => {
                self.set_merge_observations(*b)
            }
            (IterField::NumIterations, FieldValue::Integer(n)) => self.set_num_iterations(*n),
            (IterField::CaseFmt, FieldValue::Text(s)) => self.set_case_fmt(s)?,
            (IterField::RunpathFmt, FieldValue::Text(s)) => self.set_runpath_fmt(s)?,
            (_, other) => {
                return Err(ConfigAccessError::InvalidValue {
                    key: field.key().to_string(),
                    message: format!("expected {}, got {}", field.kind(), other.kind()),
                });
            }
        }
        Ok(())
    }
}

impl<B: IterConfigBackend> ConfigAccessorPort for AnalysisIterConfig<'_, B> {
    fn config_get(&self, key: &str) -> Result<FieldValue, ConfigAccessError> {
        let field = parse_key(key)?;
        self.get_field(field)?.ok_or_else(|| ConfigAccessError::Unset {
            key: key.to_string(),
        })
    }

    fn config_set(&self, key: &str, value: FieldValue) -> Result<(), ConfigAccessError> {
        let field = parse_key(key)?;
        self.set_field(field, value)
    }

    fn config_keys(&self) -> Vec<String> {
        known_fields().iter().map(|f| f.key.to_string()).collect()
    }
}

fn parse_key(key: &str) -> Result<IterField, ConfigAccessError> {
    key.parse::<IterField>()
        .map_err(|_| ConfigAccessError::UnknownKey {
            key: key.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingBackend;
    use std::sync::Arc;

    fn setup() -> AnalysisIterConfig<'static, RecordingBackend> {
        AnalysisIterConfig::alloc(Arc::new(RecordingBackend::default())).unwrap()
    }

    #[test]
    fn test_get_set_by_key() {
        let config = setup();
        config.config_set("alpha", FieldValue::Float(0.25)).unwrap();
        config
            .config_set("case_fmt", FieldValue::from("case_%d"))
            .unwrap();
        assert_eq!(config.config_get("alpha").unwrap(), FieldValue::Float(0.25));
        assert_eq!(
            config.config_get("case_fmt").unwrap(),
            FieldValue::from("case_%d")
        );
    }

    #[test]
    fn test_unknown_key() {
        let config = setup();
        assert_eq!(
            config.config_get("nope"),
            Err(ConfigAccessError::UnknownKey {
                key: "nope".to_string()
            })
        );
    }

    #[test]
    fn test_wrong_kind_is_rejected_before_forwarding() {
        let config = setup();
        let err = config
            .config_set("num_iterations", FieldValue::from("four"))
            .unwrap_err();
        assert!(matches!(err, ConfigAccessError::InvalidValue { .. }));
        assert_eq!(config.num_iterations(), 4);
    }

    #[test]
    fn test_keys_cover_every_field() {
        let config = setup();
        let keys = config.config_keys();
        assert_eq!(keys.len(), IterField::ALL.len());
        assert!(keys.contains(&"runpath_fmt".to_string()));
    }

    #[test]
    fn test_alpha_accepts_integer_value() {
        let config = setup();
        config.config_set("alpha", FieldValue::Integer(3)).unwrap();
        assert_eq!(config.alpha(), 3.0);
    }
}
