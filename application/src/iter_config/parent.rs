//! Parent object owning an iteration config record.
//!
//! In the library the iteration config lives inside the analysis config,
//! which is responsible for freeing it. [`AnalysisConfig`] plays that role:
//! it owns the record exclusively and hands out borrowed views.

use super::proxy::AnalysisIterConfig;
use crate::ports::iter_config_backend::{BoundaryError, IterConfigBackend};
use std::sync::Arc;

/// Owner of one analysis iteration configuration record.
pub struct AnalysisConfig<B: IterConfigBackend> {
    iter_config: AnalysisIterConfig<'static, B>,
}

impl<B: IterConfigBackend> AnalysisConfig<B> {
    /// Allocate a new record through `backend`.
    pub fn new(backend: Arc<B>) -> Result<Self, BoundaryError> {
        Ok(Self {
            iter_config: AnalysisIterConfig::alloc(backend)?,
        })
    }

    /// Take ownership of an already allocated record.
    pub fn from_handle(backend: Arc<B>, handle: B::Handle) -> Self {
        Self {
            iter_config: AnalysisIterConfig::owned(backend, handle),
        }
    }

    /// A borrowed view of the iteration config. Views never release the record.
    pub fn iter_config(&self) -> AnalysisIterConfig<'_, B> {
        AnalysisIterConfig::borrowed(
            Arc::clone(self.iter_config.backend()),
            self.iter_config.handle(),
            self,
        )
    }

    pub fn handle(&self) -> B::Handle {
        self.iter_config.handle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iter_config::proxy::Ownership;
    use crate::test_support::RecordingBackend;

    #[test]
    fn test_views_share_the_record() {
        let backend = Arc::new(RecordingBackend::default());
        let parent = AnalysisConfig::new(Arc::clone(&backend)).unwrap();

        parent.iter_config().set_num_iterations(8);
        let view = parent.iter_config();
        assert_eq!(view.ownership(), Ownership::Borrowed);
        assert_eq!(view.num_iterations(), 8);
    }

    #[test]
    fn test_parent_releases_once_views_never() {
        let backend = Arc::new(RecordingBackend::default());
        let parent = AnalysisConfig::new(Arc::clone(&backend)).unwrap();
        let handle = parent.handle();

        for _ in 0..5 {
            drop(parent.iter_config());
        }
        assert_eq!(backend.release_count(handle), 0);

        drop(parent);
        assert_eq!(backend.release_count(handle), 1);
        assert_eq!(backend.total_releases(), 1);
    }

    #[test]
    fn test_from_handle_takes_ownership() {
        let backend = Arc::new(RecordingBackend::default());
        let handle = backend.alloc().unwrap();
        drop(AnalysisConfig::from_handle(Arc::clone(&backend), handle));
        assert_eq!(backend.release_count(handle), 1);
    }
}
