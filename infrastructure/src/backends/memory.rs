//! In-process implementation of the configuration library contract.
//!
//! [`InMemoryIterConfigBackend`] behaves like `libenkf` does for the
//! analysis iteration config: records start at the library defaults,
//! values are stored verbatim, and misuse of a handle is fatal. It keeps
//! allocation and release counters so callers can check that every record
//! is released exactly once.

use enkf_iter_application::{BoundaryError, IterConfigBackend};
use enkf_iter_domain::IterSettings;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Identifies one record in an [`InMemoryIterConfigBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryHandle(u64);

impl fmt::Display for MemoryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record#{}", self.0)
    }
}

#[derive(Default)]
struct Store {
    next_id: u64,
    records: HashMap<u64, IterSettings>,
    released: HashSet<u64>,
    allocations: usize,
    releases: usize,
}

/// Record storage guarded by a mutex; it stands in for the library, so the
/// locking here is the library's, not the proxy's.
#[derive(Default)]
pub struct InMemoryIterConfigBackend {
    store: Mutex<Store>,
}

impl InMemoryIterConfigBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records allocated so far.
    pub fn allocations(&self) -> usize {
        self.lock().allocations
    }

    /// Number of release calls so far.
    pub fn releases(&self) -> usize {
        self.lock().releases
    }

    /// Number of records allocated and not yet released.
    pub fn live_records(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_live(&self, handle: MemoryHandle) -> bool {
        self.lock().records.contains_key(&handle.0)
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        // A panic inside the store only happens on handle misuse, which is
        // already fatal; keep the counters readable afterwards.
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn with_record<T>(
        &self,
        handle: MemoryHandle,
        op: &'static str,
        f: impl FnOnce(&mut IterSettings) -> T,
    ) -> T {
        let mut store = self.lock();
        let was_released = store.released.contains(&handle.0);
        match store.records.get_mut(&handle.0) {
            Some(record) => f(record),
            None if was_released => {
                panic!("analysis_iter_config_{op}: {handle} used after release")
            }
            None => panic!("analysis_iter_config_{op}: {handle} is not a valid record"),
        }
    }
}

impl IterConfigBackend for InMemoryIterConfigBackend {
    type Handle = MemoryHandle;

    fn alloc(&self) -> Result<MemoryHandle, BoundaryError> {
        let mut store = self.lock();
        store.next_id += 1;
        let id = store.next_id;
        store.records.insert(id, IterSettings::default());
        store.allocations += 1;
        debug!("Allocated {}", MemoryHandle(id));
        Ok(MemoryHandle(id))
    }

    fn release(&self, handle: MemoryHandle) {
        let mut store = self.lock();
        if store.records.remove(&handle.0).is_none() {
            if store.released.contains(&handle.0) {
                panic!("analysis_iter_config_free: {handle} released twice");
            }
            panic!("analysis_iter_config_free: {handle} is not a valid record");
        }
        store.released.insert(handle.0);
        store.releases += 1;
        debug!("Released {}", handle);
    }

    fn rerun(&self, h: MemoryHandle) -> bool {
        self.with_record(h, "get_rerun", |r| r.rerun)
    }

    fn set_rerun(&self, h: MemoryHandle, rerun: bool) {
        self.with_record(h, "set_rerun", |r| r.rerun = rerun)
    }

    fn rerun_start(&self, h: MemoryHandle) -> i32 {
        self.with_record(h, "get_rerun_start", |r| r.rerun_start)
    }

    fn set_rerun_start(&self, h: MemoryHandle, start: i32) {
        self.with_record(h, "set_rerun_start", |r| r.rerun_start = start)
    }

    fn log_path(&self, h: MemoryHandle) -> Result<Option<String>, BoundaryError> {
        Ok(self.with_record(h, "get_log_path", |r| Some(r.log_path.clone())))
    }

    fn set_log_path(&self, h: MemoryHandle, path: &str) -> Result<(), BoundaryError> {
        self.with_record(h, "set_log_path", |r| r.log_path = path.to_string());
        Ok(())
    }

    fn alpha(&self, h: MemoryHandle) -> f64 {
        self.with_record(h, "get_alpha", |r| r.alpha)
    }

    fn set_alpha(&self, h: MemoryHandle, alpha: f64) {
        self.with_record(h, "set_alpha", |r| r.alpha = alpha)
    }

    fn merge_observations(&self, h: MemoryHandle) -> bool {
        self.with_record(h, "get_merge_observations", |r| r.merge_observations)
    }

    fn set_merge_observations(&self, h: MemoryHandle, merge: bool) {
        self.with_record(h, "set_merge_observations", |r| r.merge_observations = merge)
    }

    fn num_iterations(&self, h: MemoryHandle) -> i32 {
        self.with_record(h, "get_num_iterations", |r| r.num_iterations)
    }

    fn set_num_iterations(&self, h: MemoryHandle, num_iterations: i32) {
        self.with_record(h, "set_num_iterations", |r| r.num_iterations = num_iterations)
    }

    fn case_fmt(&self, h: MemoryHandle) -> Result<Option<String>, BoundaryError> {
        Ok(self.with_record(h, "get_case_fmt", |r| Some(r.case_fmt.clone())))
    }

    fn set_case_fmt(&self, h: MemoryHandle, fmt: &str) -> Result<(), BoundaryError> {
        self.with_record(h, "set_case_fmt", |r| r.case_fmt = fmt.to_string());
        Ok(())
    }

    fn runpath_fmt(&self, h: MemoryHandle) -> Result<Option<String>, BoundaryError> {
        Ok(self.with_record(h, "get_runpath_fmt", |r| Some(r.runpath_fmt.clone())))
    }

    fn set_runpath_fmt(&self, h: MemoryHandle, fmt: &str) -> Result<(), BoundaryError> {
        self.with_record(h, "set_runpath_fmt", |r| r.runpath_fmt = fmt.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enkf_iter_application::{AnalysisConfig, AnalysisIterConfig, SnapshotUseCase};
    use std::sync::Arc;

    #[test]
    fn test_fresh_record_has_library_defaults() {
        let backend = InMemoryIterConfigBackend::new();
        let h = backend.alloc().unwrap();
        assert_eq!(backend.num_iterations(h), 4);
        assert_eq!(
            backend.case_fmt(h).unwrap().as_deref(),
            Some("ITERATED_ENSEMBLE_SMOOTHER%d")
        );
        backend.release(h);
    }

    #[test]
    fn test_records_are_independent() {
        let backend = InMemoryIterConfigBackend::new();
        let a = backend.alloc().unwrap();
        let b = backend.alloc().unwrap();
        backend.set_alpha(a, 0.25);
        assert_eq!(backend.alpha(a), 0.25);
        assert_eq!(backend.alpha(b), 1.5);
        backend.release(a);
        backend.release(b);
    }

    #[test]
    fn test_proxy_round_trip_and_release() {
        let backend = Arc::new(InMemoryIterConfigBackend::new());
        {
            let config = AnalysisIterConfig::alloc(Arc::clone(&backend)).unwrap();
            config.set_alpha(0.25);
            config.set_num_iterations(4);
            config.set_case_fmt("case_%d").unwrap();
            config.set_runpath_fmt("run_%d").unwrap();

            let snapshot = SnapshotUseCase::execute(&config).unwrap();
            assert_eq!(snapshot.alpha, 0.25);
            assert_eq!(snapshot.num_iterations, 4);
            assert_eq!(snapshot.case_fmt.as_deref(), Some("case_%d"));
            assert_eq!(snapshot.runpath_fmt.as_deref(), Some("run_%d"));
            assert_eq!(backend.live_records(), 1);
        }
        assert_eq!(backend.allocations(), 1);
        assert_eq!(backend.releases(), 1);
        assert_eq!(backend.live_records(), 0);
    }

    #[test]
    fn test_parent_and_views() {
        let backend = Arc::new(InMemoryIterConfigBackend::new());
        let parent = AnalysisConfig::new(Arc::clone(&backend)).unwrap();
        let handle = parent.handle();
        for n in 1..=3 {
            parent.iter_config().set_num_iterations(n);
        }
        assert_eq!(parent.iter_config().num_iterations(), 3);
        assert_eq!(backend.releases(), 0);

        drop(parent);
        assert_eq!(backend.releases(), 1);
        assert!(!backend.is_live(handle));
    }

    #[test]
    #[should_panic(expected = "released twice")]
    fn test_double_release_is_fatal() {
        let backend = InMemoryIterConfigBackend::new();
        let h = backend.alloc().unwrap();
        backend.release(h);
        backend.release(h);
    }

    #[test]
    #[should_panic(expected = "used after release")]
    fn test_use_after_release_is_fatal() {
        let backend = InMemoryIterConfigBackend::new();
        let h = backend.alloc().unwrap();
        backend.release(h);
        let _ = backend.alpha(h);
    }

    #[test]
    fn test_handle_display() {
        assert_eq!(MemoryHandle(7).to_string(), "record#7");
    }
}
