//! Platform abstraction layer
//!
//! Browser-only plumbing:
//! - Storage (LocalStorage on web)

#[cfg(target_arch = "wasm32")]
pub mod storage;
