//! Capability table of the external configuration library.
//!
//! Every operation the analysis iteration configuration record supports is
//! a method on [`IterConfigBackend`]. A backend value is bound once at
//! startup (native library, in-memory reference implementation, test
//! double) and handed to each proxy at construction. There is no
//! process-wide registration of library functions.
//!
//! The contract is deliberately thin: methods forward to the library
//! as-is. Values are not validated, and library faults (invalid handle,
//! abort) surface however the library surfaces them. The only errors the
//! Rust side can observe itself are at the text boundary, reported as
//! [`BoundaryError`].

use std::fmt;
use thiserror::Error;

/// Faults observed while crossing the library boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoundaryError {
    #[error("Library returned a null handle from {operation}")]
    NullHandle { operation: &'static str },

    #[error("Text for '{field}' contains a NUL byte at position {position}")]
    InteriorNul { field: &'static str, position: usize },

    #[error("Library returned non-UTF-8 text for '{field}'")]
    InvalidUtf8 { field: &'static str },
}

/// Operations provided by the external configuration library.
///
/// `Handle` identifies one record inside the library. It is `Copy` because
/// it is only an identifier; who releases it is tracked by the proxy, not
/// by the handle.
pub trait IterConfigBackend {
    type Handle: Copy + fmt::Debug;

    /// Create a record initialised to the library defaults.
    fn alloc(&self) -> Result<Self::Handle, BoundaryError>;

    /// Release a record. Must be called exactly once per allocated record.
    fn release(&self, handle: Self::Handle);

    fn rerun(&self, handle: Self::Handle) -> bool;
    fn set_rerun(&self, handle: Self::Handle, rerun: bool);

    fn rerun_start(&self, handle: Self::Handle) -> i32;
    fn set_rerun_start(&self, handle: Self::Handle, start: i32);

    /// `None` when the library holds no string.
    fn log_path(&self, handle: Self::Handle) -> Result<Option<String>, BoundaryError>;
    fn set_log_path(&self, handle: Self::Handle, path: &str) -> Result<(), BoundaryError>;

    fn alpha(&self, handle: Self::Handle) -> f64;
    fn set_alpha(&self, handle: Self::Handle, alpha: f64);

    fn merge_observations(&self, handle: Self::Handle) -> bool;
    fn set_merge_observations(&self, handle: Self::Handle, merge: bool);

    fn num_iterations(&self, handle: Self::Handle) -> i32;
    fn set_num_iterations(&self, handle: Self::Handle, num_iterations: i32);

    fn case_fmt(&self, handle: Self::Handle) -> Result<Option<String>, BoundaryError>;
    fn set_case_fmt(&self, handle: Self::Handle, fmt: &str) -> Result<(), BoundaryError>;

    fn runpath_fmt(&self, handle: Self::Handle) -> Result<Option<String>, BoundaryError>;
    fn set_runpath_fmt(&self, handle: Self::Handle, fmt: &str) -> Result<(), BoundaryError>;
}
