//! Plan Iterations use case.
//!
//! Lists the case name and run path the iterated smoother will use for
//! each iteration of a record.

use crate::iter_config::proxy::{AnalysisIterConfig, IterConfigError};
use crate::ports::iter_config_backend::IterConfigBackend;
use serde::Serialize;

/// Names used by one iteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IterationPlan {
    pub iteration: i32,
    pub case: String,
    pub runpath: String,
}

/// Use case for rendering per-iteration names.
pub struct PlanIterationsUseCase;

impl PlanIterationsUseCase {
    /// One entry per iteration in `0..num_iterations`. A count below one
    /// yields an empty plan.
    pub fn execute<B: IterConfigBackend>(
        config: &AnalysisIterConfig<'_, B>,
    ) -> Result<Vec<IterationPlan>, IterConfigError> {
        let count = config.num_iterations().max(0);
        (0..count)
            .map(|iteration| {
                Ok(IterationPlan {
                    iteration,
                    case: config.iteration_case(iteration)?,
                    runpath: config.iteration_runpath(iteration)?,
                })
            })
            .collect()
    }
}
