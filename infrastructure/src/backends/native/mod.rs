//! `libenkf` backend.
//!
//! Binds the analysis iteration config functions of the native library
//! into an [`IterConfigBackend`](enkf_iter_application::IterConfigBackend).
//! Only built with the `native` feature, which links against `libenkf`.
//!
//! Each method is a single call into the library. Text crosses the boundary
//! through [`marshal`]; everything else is passed as the matching C type.
//! Invalid handles abort inside the library; nothing here checks for them.

pub mod marshal;

#[cfg(feature = "native")]
pub mod ffi;

#[cfg(feature = "native")]
pub use backend::{NativeHandle, NativeIterConfigBackend};

#[cfg(feature = "native")]
mod backend {
    use super::ffi::{self, analysis_iter_config_type};
    use super::marshal::{from_c_string, to_c_string};
    use enkf_iter_application::{BoundaryError, IterConfigBackend};
    use std::ptr::NonNull;
    use tracing::debug;

    /// Pointer to a record inside `libenkf`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NativeHandle(NonNull<analysis_iter_config_type>);

    impl NativeHandle {
        /// Wrap a pointer obtained from the library (e.g. from a parent object).
        ///
        /// # Safety
        ///
        /// `ptr` must point to a live `analysis_iter_config_type` record.
        pub unsafe fn from_raw(ptr: *mut analysis_iter_config_type) -> Option<Self> {
            NonNull::new(ptr).map(NativeHandle)
        }

        pub fn as_ptr(&self) -> *mut analysis_iter_config_type {
            self.0.as_ptr()
        }
    }

    /// Capability table backed by the linked `libenkf`.
    #[derive(Debug)]
    pub struct NativeIterConfigBackend {
        _private: (),
    }

    impl NativeIterConfigBackend {
        /// Bind the library's operations. Linking happens at build time, so
        /// this cannot fail at runtime.
        pub fn bind() -> Self {
            debug!("Binding libenkf analysis_iter_config operations");
            Self { _private: () }
        }
    }

    impl IterConfigBackend for NativeIterConfigBackend {
        type Handle = NativeHandle;

        fn alloc(&self) -> Result<NativeHandle, BoundaryError> {
            // SAFETY: no preconditions
            let ptr = unsafe { ffi::analysis_iter_config_alloc() };
            NonNull::new(ptr)
                .map(NativeHandle)
                .ok_or(BoundaryError::NullHandle {
                    operation: "analysis_iter_config_alloc",
                })
        }

        fn release(&self, h: NativeHandle) {
            // SAFETY: the proxy releases each handle at most once
            unsafe { ffi::analysis_iter_config_free(h.as_ptr()) }
        }

        // SAFETY (all accessors below): `h` came from the library and has not
        // been released; the proxy's ownership rules guarantee this.

        fn rerun(&self, h: NativeHandle) -> bool {
            unsafe { ffi::analysis_iter_config_get_rerun(h.as_ptr()) }
        }

        fn set_rerun(&self, h: NativeHandle, rerun: bool) {
            unsafe { ffi::analysis_iter_config_set_rerun(h.as_ptr(), rerun) }
        }

        fn rerun_start(&self, h: NativeHandle) -> i32 {
            unsafe { ffi::analysis_iter_config_get_rerun_start(h.as_ptr()) }
        }

        fn set_rerun_start(&self, h: NativeHandle, start: i32) {
            unsafe { ffi::analysis_iter_config_set_rerun_start(h.as_ptr(), start) }
        }

        fn log_path(&self, h: NativeHandle) -> Result<Option<String>, BoundaryError> {
            unsafe {
                let ptr = ffi::analysis_iter_config_get_log_path(h.as_ptr());
                from_c_string("log_path", ptr)
            }
        }

        fn set_log_path(&self, h: NativeHandle, path: &str) -> Result<(), BoundaryError> {
            let path = to_c_string("log_path", path)?;
            // The library copies the string before returning
            unsafe { ffi::analysis_iter_config_set_log_path(h.as_ptr(), path.as_ptr()) };
            Ok(())
        }

        fn alpha(&self, h: NativeHandle) -> f64 {
            unsafe { ffi::analysis_iter_config_get_alpha(h.as_ptr()) }
        }

        fn set_alpha(&self, h: NativeHandle, alpha: f64) {
            unsafe { ffi::analysis_iter_config_set_alpha(h.as_ptr(), alpha) }
        }

        fn merge_observations(&self, h: NativeHandle) -> bool {
            unsafe { ffi::analysis_iter_config_get_merge_observations(h.as_ptr()) }
        }

        fn set_merge_observations(&self, h: NativeHandle, merge: bool) {
            unsafe { ffi::analysis_iter_config_set_merge_observations(h.as_ptr(), merge) }
        }

        fn num_iterations(&self, h: NativeHandle) -> i32 {
            unsafe { ffi::analysis_iter_config_get_num_iterations(h.as_ptr()) }
        }

        fn set_num_iterations(&self, h: NativeHandle, num_iterations: i32) {
            unsafe { ffi::analysis_iter_config_set_num_iterations(h.as_ptr(), num_iterations) }
        }

        fn case_fmt(&self, h: NativeHandle) -> Result<Option<String>, BoundaryError> {
            unsafe {
                let ptr = ffi::analysis_iter_config_get_case_fmt(h.as_ptr());
                from_c_string("case_fmt", ptr)
            }
        }

        fn set_case_fmt(&self, h: NativeHandle, fmt: &str) -> Result<(), BoundaryError> {
            let fmt = to_c_string("case_fmt", fmt)?;
            unsafe { ffi::analysis_iter_config_set_case_fmt(h.as_ptr(), fmt.as_ptr()) };
            Ok(())
        }

        fn runpath_fmt(&self, h: NativeHandle) -> Result<Option<String>, BoundaryError> {
            unsafe {
                let ptr = ffi::analysis_iter_config_get_runpath_fmt(h.as_ptr());
                from_c_string("runpath_fmt", ptr)
            }
        }

        fn set_runpath_fmt(&self, h: NativeHandle, fmt: &str) -> Result<(), BoundaryError> {
            let fmt = to_c_string("runpath_fmt", fmt)?;
            unsafe { ffi::analysis_iter_config_set_runpath_fmt(h.as_ptr(), fmt.as_ptr()) };
            Ok(())
        }
    }
}
