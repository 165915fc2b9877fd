//! The analysis iteration config proxy and its owner.

pub mod accessor;
pub mod parent;
pub mod proxy;
