//! Configuration proxy over a library-owned analysis iteration record.
//!
//! [`AnalysisIterConfig`] holds a handle to a record inside the external
//! library, the capability table used to reach it, and an ownership tag.
//! It stores no field values: every getter reads the record and every
//! setter writes it in place.
//!
//! # Ownership
//!
//! | Mode | Constructed by | Releases the record |
//! |------|----------------|---------------------|
//! | [`Ownership::Exclusive`] | [`owned`], [`alloc`], [`new`] without parent | exactly once, on [`close`] or drop |
//! | [`Ownership::Borrowed`] | [`borrowed`], [`new`] with parent | never |
//!
//! A borrowed proxy carries the parent's lifetime `'p`, so it cannot
//! outlive the object that is responsible for releasing the record.
//!
//! [`owned`]: AnalysisIterConfig::owned
//! [`alloc`]: AnalysisIterConfig::alloc
//! [`new`]: AnalysisIterConfig::new
//! [`borrowed`]: AnalysisIterConfig::borrowed
//! [`close`]: AnalysisIterConfig::close

use crate::ports::iter_config_backend::{BoundaryError, IterConfigBackend};
use enkf_iter_domain::{DomainError, IterField, render_iteration};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, trace};

/// Who is responsible for releasing the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// The proxy releases the record.
    Exclusive,
    /// A parent outlives the proxy and releases the record.
    Borrowed,
}

/// Errors from operations layered on top of plain field access.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IterConfigError {
    #[error(transparent)]
    Boundary(#[from] BoundaryError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Library holds no value for '{0}'")]
    Unset(IterField),
}

/// Typed proxy for one analysis iteration configuration record.
pub struct AnalysisIterConfig<'p, B: IterConfigBackend> {
    backend: Arc<B>,
    handle: B::Handle,
    ownership: Ownership,
    /// Still owes the library a release. Only ever true for exclusive proxies.
    release_pending: bool,
    _parent: PhantomData<&'p ()>,
}

impl<B: IterConfigBackend> AnalysisIterConfig<'static, B> {
    /// Wrap a record this proxy now owns exclusively.
    pub fn owned(backend: Arc<B>, handle: B::Handle) -> Self {
        debug!("Wrapping {:?} with exclusive ownership", handle);
        Self {
            backend,
            handle,
            ownership: Ownership::Exclusive,
            release_pending: true,
            _parent: PhantomData,
        }
    }

    /// Ask the library for a fresh record and own it exclusively.
    pub fn alloc(backend: Arc<B>) -> Result<Self, BoundaryError> {
        let handle = backend.alloc()?;
        Ok(Self::owned(backend, handle))
    }
}

impl<'p, B: IterConfigBackend> AnalysisIterConfig<'p, B> {
    /// Wrap `handle`. With a parent the proxy borrows the record; without one
    /// it takes exclusive ownership.
    pub fn new<P: ?Sized>(backend: Arc<B>, handle: B::Handle, parent: Option<&'p P>) -> Self {
        match parent {
            Some(parent) => Self::borrowed(backend, handle, parent),
            None => {
                debug!("Wrapping {:?} with exclusive ownership", handle);
                Self {
                    backend,
                    handle,
                    ownership: Ownership::Exclusive,
                    release_pending: true,
                    _parent: PhantomData,
                }
            }
        }
    }

    /// Wrap a record owned by `parent`. The proxy never releases it.
    pub fn borrowed<P: ?Sized>(backend: Arc<B>, handle: B::Handle, _parent: &'p P) -> Self {
        trace!("Borrowing {:?} from parent", handle);
        Self {
            backend,
            handle,
            ownership: Ownership::Borrowed,
            release_pending: false,
            _parent: PhantomData,
        }
    }

    pub fn handle(&self) -> B::Handle {
        self.handle
    }

    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    pub fn is_owned(&self) -> bool {
        self.ownership == Ownership::Exclusive
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Release the record now instead of at end of scope.
    ///
    /// Does nothing for borrowed proxies.
    pub fn close(mut self) {
        self.release_if_pending();
    }

    /// Give up the release duty and return the handle.
    ///
    /// The caller becomes responsible for releasing the record.
    pub fn into_raw(mut self) -> B::Handle {
        self.release_pending = false;
        self.handle
    }

    fn release_if_pending(&mut self) {
        if std::mem::take(&mut self.release_pending) {
            debug!("Releasing {:?}", self.handle);
            self.backend.release(self.handle);
        }
    }

    // ==================== Field accessors ====================

    pub fn rerun(&self) -> bool {
        self.backend.rerun(self.handle)
    }

    pub fn set_rerun(&self, rerun: bool) {
        trace!("set rerun = {} on {:?}", rerun, self.handle);
        self.backend.set_rerun(self.handle, rerun);
    }

    pub fn rerun_start(&self) -> i32 {
        self.backend.rerun_start(self.handle)
    }

    pub fn set_rerun_start(&self, start: i32) {
        trace!("set rerun_start = {} on {:?}", start, self.handle);
        self.backend.set_rerun_start(self.handle, start);
    }

    pub fn log_path(&self) -> Result<Option<String>, BoundaryError> {
        self.backend.log_path(self.handle)
    }

    pub fn set_log_path(&self, path: &str) -> Result<(), BoundaryError> {
        trace!("set log_path = {:?} on {:?}", path, self.handle);
        self.backend.set_log_path(self.handle, path)
    }

    pub fn alpha(&self) -> f64 {
        self.backend.alpha(self.handle)
    }

    pub fn set_alpha(&self, alpha: f64) {
        trace!("set alpha = {} on {:?}", alpha, self.handle);
        self.backend.set_alpha(self.handle, alpha);
    }

    pub fn merge_observations(&self) -> bool {
        self.backend.merge_observations(self.handle)
    }

    pub fn set_merge_observations(&self, merge: bool) {
        trace!("set merge_observations = {} on {:?}", merge, self.handle);
        self.backend.set_merge_observations(self.handle, merge);
    }

    pub fn num_iterations(&self) -> i32 {
        self.backend.num_iterations(self.handle)
    }

    pub fn set_num_iterations(&self, num_iterations: i32) {
        trace!("set num_iterations = {} on {:?}", num_iterations, self.handle);
        self.backend.set_num_iterations(self.handle, num_iterations);
    }

    pub fn case_fmt(&self) -> Result<Option<String>, BoundaryError> {
        self.backend.case_fmt(self.handle)
    }

    pub fn set_case_fmt(&self, fmt: &str) -> Result<(), BoundaryError> {
        trace!("set case_fmt = {:?} on {:?}", fmt, self.handle);
        self.backend.set_case_fmt(self.handle, fmt)
    }

    pub fn runpath_fmt(&self) -> Result<Option<String>, BoundaryError> {
        self.backend.runpath_fmt(self.handle)
    }

    pub fn set_runpath_fmt(&self, fmt: &str) -> Result<(), BoundaryError> {
        trace!("set runpath_fmt = {:?} on {:?}", fmt, self.handle);
        self.backend.set_runpath_fmt(self.handle, fmt)
    }

    // ==================== Iteration naming ====================

    /// Case name for iteration `iter`, rendered from the current case format.
    pub fn iteration_case(&self, iter: i32) -> Result<String, IterConfigError> {
        let fmt = self
            .case_fmt()?
            .ok_or(IterConfigError::Unset(IterField::CaseFmt))?;
        Ok(render_iteration(&fmt, iter)?)
    }

    /// Run path for iteration `iter`, rendered from the current run path format.
    pub fn iteration_runpath(&self, iter: i32) -> Result<String, IterConfigError> {
        let fmt = self
            .runpath_fmt()?
            .ok_or(IterConfigError::Unset(IterField::RunpathFmt))?;
        Ok(render_iteration(&fmt, iter)?)
    }
}

impl<B: IterConfigBackend> Drop for AnalysisIterConfig<'_, B> {
    fn drop(&mut self) {
        self.release_if_pending();
    }
}

impl<B: IterConfigBackend> fmt::Debug for AnalysisIterConfig<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisIterConfig")
            .field("handle", &self.handle)
            .field("ownership", &self.ownership)
            .field("release_pending", &self.release_pending)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingBackend;

    fn setup() -> (Arc<RecordingBackend>, AnalysisIterConfig<'static, RecordingBackend>) {
        let backend = Arc::new(RecordingBackend::default());
        let config = AnalysisIterConfig::alloc(Arc::clone(&backend)).unwrap();
        (backend, config)
    }

    // ==================== Round trips ====================

    #[test]
    fn test_alpha_round_trip() {
        let (_backend, config) = setup();
        config.set_alpha(0.25);
        assert_eq!(config.alpha(), 0.25);
    }

    #[test]
    fn test_num_iterations_round_trip() {
        let (_backend, config) = setup();
        config.set_num_iterations(4);
        assert_eq!(config.num_iterations(), 4);
    }

    #[test]
    fn test_case_fmt_round_trip() {
        let (_backend, config) = setup();
        config.set_case_fmt("case_%d").unwrap();
        assert_eq!(config.case_fmt().unwrap().as_deref(), Some("case_%d"));
    }

    #[test]
    fn test_runpath_fmt_is_not_aliased_to_case_fmt() {
        let (backend, config) = setup();
        config.set_case_fmt("case_%d").unwrap();
        config.set_runpath_fmt("run_%d").unwrap();

        assert_eq!(config.runpath_fmt().unwrap().as_deref(), Some("run_%d"));
        assert_eq!(config.case_fmt().unwrap().as_deref(), Some("case_%d"));

        let calls = backend.calls();
        assert!(calls.contains(&"set_runpath_fmt"));
        assert!(calls.contains(&"runpath_fmt"));
    }

    #[test]
    fn test_remaining_fields_round_trip() {
        let (_backend, config) = setup();
        config.set_rerun(true);
        config.set_rerun_start(17);
        config.set_log_path("/scratch/update_log").unwrap();
        config.set_merge_observations(true);

        assert!(config.rerun());
        assert_eq!(config.rerun_start(), 17);
        assert_eq!(
            config.log_path().unwrap().as_deref(),
            Some("/scratch/update_log")
        );
        assert!(config.merge_observations());
    }

    #[test]
    fn test_values_pass_through_unvalidated() {
        let (_backend, config) = setup();
        config.set_num_iterations(-3);
        config.set_alpha(f64::INFINITY);
        config.set_case_fmt("%s%s").unwrap();
        assert_eq!(config.num_iterations(), -3);
        assert_eq!(config.alpha(), f64::INFINITY);
        assert_eq!(config.case_fmt().unwrap().as_deref(), Some("%s%s"));
    }

    // ==================== Ownership ====================

    #[test]
    fn test_exclusive_releases_exactly_once() {
        let (backend, config) = setup();
        let handle = config.handle();
        for i in 0..10 {
            config.set_num_iterations(i);
            let _ = config.num_iterations();
        }
        drop(config);
        assert_eq!(backend.release_count(handle), 1);
    }

    #[test]
    fn test_close_releases_once() {
        let (backend, config) = setup();
        let handle = config.handle();
        config.close();
        assert_eq!(backend.release_count(handle), 1);
    }

    #[test]
    fn test_borrowed_never_releases() {
        let (backend, owner) = setup();
        let handle = owner.handle();

        for _ in 0..3 {
            let view = AnalysisIterConfig::borrowed(Arc::clone(&backend), handle, &owner);
            assert_eq!(view.ownership(), Ownership::Borrowed);
            view.set_alpha(0.5);
            drop(view);
        }
        let view = AnalysisIterConfig::new(Arc::clone(&backend), handle, Some(&owner));
        view.close();
        assert_eq!(backend.release_count(handle), 0);

        drop(owner);
        assert_eq!(backend.release_count(handle), 1);
    }

    #[test]
    fn test_new_without_parent_is_exclusive() {
        let backend = Arc::new(RecordingBackend::default());
        let handle = backend.alloc().unwrap();
        let config = AnalysisIterConfig::new(Arc::clone(&backend), handle, None::<&()>);
        assert!(config.is_owned());
        drop(config);
        assert_eq!(backend.release_count(handle), 1);
    }

    #[test]
    fn test_into_raw_skips_release() {
        let (backend, config) = setup();
        let handle = config.into_raw();
        assert_eq!(backend.release_count(handle), 0);

        // Re-wrapping hands the duty to the new proxy
        drop(AnalysisIterConfig::owned(Arc::clone(&backend), handle));
        assert_eq!(backend.release_count(handle), 1);
    }

    #[test]
    #[should_panic(expected = "no live record")]
    fn test_library_fault_surfaces_unchanged() {
        let backend = Arc::new(RecordingBackend::default());
        let parent = ();
        // Borrowed, so unwinding does not touch the poisoned backend again
        let config = AnalysisIterConfig::borrowed(backend, 42, &parent);
        let _ = config.alpha();
    }

    // ==================== Iteration naming ====================

    #[test]
    fn test_iteration_names() {
        let (_backend, config) = setup();
        config.set_case_fmt("case_%d").unwrap();
        config.set_runpath_fmt("runs/iter%02d").unwrap();
        assert_eq!(config.iteration_case(3).unwrap(), "case_3");
        assert_eq!(config.iteration_runpath(3).unwrap(), "runs/iter03");
    }

    #[test]
    fn test_iteration_name_with_bad_template() {
        let (_backend, config) = setup();
        config.set_case_fmt("case_%s").unwrap();
        assert!(matches!(
            config.iteration_case(1),
            Err(IterConfigError::Domain(DomainError::InvalidTemplate { .. }))
        ));
    }
}
