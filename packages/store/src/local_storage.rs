//! # Browser `localStorage` store
//!
//! [`LocalStorageStore`] is the [`KeyValueStore`] used on the **web platform**.
//! The token survives page reloads for as long as the browser keeps the
//! origin's storage, which matches how the session is expected to behave in a
//! tab.
//!
//! The `Storage` handle is looked up on every call. `web_sys::Storage` is not
//! `Send`, and the lookup is a cheap property read on `window`.

use crate::kv::{KeyValueStore, StoreError};

/// `window.localStorage`-backed KeyValueStore.
#[derive(Clone, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()
            .ok_or(StoreError::Unavailable)?
            .set_item(key, value)
            .map_err(|e| StoreError::Backend(format!("{e:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        Self::storage()
            .ok_or(StoreError::Unavailable)?
            .remove_item(key)
            .map_err(|e| StoreError::Backend(format!("{e:?}")))
    }
}
