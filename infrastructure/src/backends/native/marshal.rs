//! Text conversion at the C boundary.

use enkf_iter_application::BoundaryError;
use libc::c_char;
use std::ffi::{CStr, CString};

/// Copy `value` into a NUL-terminated buffer for the library.
pub fn to_c_string(field: &'static str, value: &str) -> Result<CString, BoundaryError> {
    CString::new(value).map_err(|e| BoundaryError::InteriorNul {
        field,
        position: e.nul_position(),
    })
}

/// Copy a library-owned string into an owned `String`.
///
/// A null pointer means the library holds no value.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string that stays valid
/// for the duration of the call.
pub unsafe fn from_c_string(
    field: &'static str,
    ptr: *const c_char,
) -> Result<Option<String>, BoundaryError> {
    if ptr.is_null() {
        return Ok(None);
    }
    // SAFETY: non-null and NUL-terminated per the caller's contract
    let text = unsafe { CStr::from_ptr(ptr) };
    text.to_str()
        .map(|s| Some(s.to_owned()))
        .map_err(|_| BoundaryError::InvalidUtf8 { field })
}
