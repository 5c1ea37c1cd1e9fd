//! # Key-value persistence for client state
//!
//! The client keeps very little on disk: the bearer token issued at login and
//! nothing else. [`KeyValueStore`] is the seam every platform backend
//! implements so the session code never needs to know where that string lives.
//!
//! | Backend | Platform |
//! |---------|----------|
//! | [`crate::MemoryStore`] | tests, and any shell that should forget on exit |
//! | [`crate::FileStore`] | desktop / mobile, one file per key |
//! | `LocalStorageStore` | browser `window.localStorage` (wasm + `web` feature) |
//!
//! Reads never fail: an unreadable value is reported as absent, which the
//! session layer already treats as "not logged in". Writes and removals return
//! [`StoreError`] so the caller can log them.

use thiserror::Error;

/// Errors raised when writing or removing persisted values.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage is not available on this platform")]
    Unavailable,
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Synchronous string storage keyed by name.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Removing a key that does not exist is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
