//! Apply Settings use case.
//!
//! Pushes a complete [`IterSettings`] value (typically produced by the
//! config loader) into a live record through its proxy.

use crate::iter_config::proxy::AnalysisIterConfig;
use crate::ports::iter_config_backend::{BoundaryError, IterConfigBackend};
use enkf_iter_domain::IterSettings;
use tracing::debug;

/// Use case for writing every field of a record.
///
/// Values are written in record order and not validated here; run
/// [`IterSettings::validate`] first if the source is untrusted.
pub struct ApplySettingsUseCase;

impl ApplySettingsUseCase {
    pub fn execute<B: IterConfigBackend>(
        config: &AnalysisIterConfig<'_, B>,
        settings: &IterSettings,
    ) -> Result<(), BoundaryError> {
        debug!("Applying settings to {:?}", config.handle());

        config.set_rerun(settings.rerun);
        config.set_rerun_start(settings.rerun_start);
        config.set_log_path(&settings.log_path)?;
        config.set_alpha(settings.alpha);
        config.set_merge_observations(settings.merge_observations);
        config.set_num_iterations(settings.num_iterations);
        config.set_case_fmt(&settings.case_fmt)?;
        config.set_runpath_fmt(&settings.runpath_fmt)?;

        Ok(())
    }
}
