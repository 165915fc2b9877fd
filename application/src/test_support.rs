//! Test double for the library capability table.

use crate::ports::iter_config_backend::{BoundaryError, IterConfigBackend};
use enkf_iter_domain::IterSettings;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
struct State {
    next: u32,
    records: HashMap<u32, IterSettings>,
    releases: HashMap<u32, usize>,
    calls: Vec<&'static str>,
}

/// Records every forwarded call and counts releases per handle.
#[derive(Default)]
pub(crate) struct RecordingBackend {
    state: Mutex<State>,
}

impl RecordingBackend {
    pub(crate) fn release_count(&self, handle: u32) -> usize {
        let state = self.state.lock().unwrap();
        state.releases.get(&handle).copied().unwrap_or(0)
    }

    pub(crate) fn total_releases(&self) -> usize {
        self.state.lock().unwrap().releases.values().sum()
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    fn with<T>(&self, handle: u32, op: &'static str, f: impl FnOnce(&mut IterSettings) -> T) -> T {
        let mut state = self.state.lock().unwrap();
        state.calls.push(op);
        let record = state
            .records
            .get_mut(&handle)
            .unwrap_or_else(|| panic!("{op}: no live record for handle {handle}"));
        f(record)
    }
}

impl IterConfigBackend for RecordingBackend {
    type Handle = u32;

    fn alloc(&self) -> Result<u32, BoundaryError> {
        let mut state = self.state.lock().unwrap();
        state.next += 1;
        let handle = state.next;
        state.records.insert(handle, IterSettings::default());
        Ok(handle)
    }

    fn release(&self, handle: u32) {
        let mut state = self.state.lock().unwrap();
        state.calls.push("release");
        state.records.remove(&handle);
        *state.releases.entry(handle).or_insert(0) += 1;
    }

    fn rerun(&self, h: u32) -> bool {
        self.with(h, "rerun", |r| r.rerun)
    }
    fn set_rerun(&self, h: u32, rerun: bool) {
        self.with(h, "set_rerun", |r| r.rerun = rerun)
    }

    fn rerun_start(&self, h: u32) -> i32 {
        self.with(h, "rerun_start", |r| r.rerun_start)
    }
    fn set_rerun_start(&self, h: u32, start: i32) {
        self.with(h, "set_rerun_start", |r| r.rerun_start = start)
    }

    fn log_path(&self, h: u32) -> Result<Option<String>, BoundaryError> {
        Ok(self.with(h, "log_path", |r| Some(r.log_path.clone())))
    }
    fn set_log_path(&self, h: u32, path: &str) -> Result<(), BoundaryError> {
        self.with(h, "set_log_path", |r| r.log_path = path.to_string());
        Ok(())
    }

    fn alpha(&self, h: u32) -> f64 {
        self.with(h, "alpha", |r| r.alpha)
    }
    fn set_alpha(&self, h: u32, alpha: f64) {
        self.with(h, "set_alpha", |r| r.alpha = alpha)
    }

    fn merge_observations(&self, h: u32) -> bool {
        self.with(h, "merge_observations", |r| r.merge_observations)
    }
    fn set_merge_observations(&self, h: u32, merge: bool) {
        self.with(h, "set_merge_observations", |r| r.merge_observations = merge)
    }

    fn num_iterations(&self, h: u32) -> i32 {
        self.with(h, "num_iterations", |r| r.num_iterations)
    }
    fn set_num_iterations(&self, h: u32, n: i32) {
        self.with(h, "set_num_iterations", |r| r.num_iterations = n)
    }

    fn case_fmt(&self, h: u32) -> Result<Option<String>, BoundaryError> {
        Ok(self.with(h, "case_fmt", |r| Some(r.case_fmt.clone())))
    }
    fn set_case_fmt(&self, h: u32, fmt: &str) -> Result<(), BoundaryError> {
        self.with(h, "set_case_fmt", |r| r.case_fmt = fmt.to_string());
        Ok(())
    }

    fn runpath_fmt(&self, h: u32) -> Result<Option<String>, BoundaryError> {
        Ok(self.with(h, "runpath_fmt", |r| Some(r.runpath_fmt.clone())))
    }
    fn set_runpath_fmt(&self, h: u32, fmt: &str) -> Result<(), BoundaryError> {
        self.with(h, "set_runpath_fmt", |r| r.runpath_fmt = fmt.to_string());
        Ok(())
    }
}
