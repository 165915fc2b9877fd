//! Implementations of the library capability table.
//!
//! - [`memory::InMemoryIterConfigBackend`]: in-process reference implementation
//! - `native::NativeIterConfigBackend`: `libenkf` via FFI (feature `native`)

pub mod memory;
pub mod native;

pub use memory::{InMemoryIterConfigBackend, MemoryHandle};
#[cfg(feature = "native")]
pub use native::{NativeHandle, NativeIterConfigBackend};
