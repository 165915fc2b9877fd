//! Application layer for enkf-iter
//!
//! This crate contains the configuration proxy, the port describing the
//! external library's operations, and use cases built on the proxy.
//! It depends only on the domain layer.

pub mod iter_config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use iter_config::{
    parent::AnalysisConfig,
    proxy::{AnalysisIterConfig, IterConfigError, Ownership},
};
pub use ports::{
    config_accessor::{ConfigAccessError, ConfigAccessorPort},
    iter_config_backend::{BoundaryError, IterConfigBackend},
};
pub use use_cases::{
    apply_settings::ApplySettingsUseCase,
    plan_iterations::{IterationPlan, PlanIterationsUseCase},
    snapshot::{IterSettingsSnapshot, SnapshotUseCase},
};
