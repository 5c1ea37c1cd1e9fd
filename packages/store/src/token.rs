//! The persisted bearer token.

use crate::kv::{KeyValueStore, StoreError};

/// A single opaque token string stored under a fixed key.
#[derive(Clone, Debug)]
pub struct PersistedToken<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> PersistedToken<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Load the token. Blank values count as absent.
    pub fn load(&self) -> Option<String> {
        self.store
            .get(&self.key)
            .filter(|token| !token.trim().is_empty())
    }

    pub fn save(&self, token: &str) -> Result<(), StoreError> {
        self.store.set(&self.key, token)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn test_save_load_clear() {
        let store = MemoryStore::new();
        let token = PersistedToken::new(store.clone(), "token");

        assert!(token.load().is_none());

        token.save("t1").unwrap();
        assert_eq!(token.load().as_deref(), Some("t1"));
        assert_eq!(store.get("token").as_deref(), Some("t1"));

        token.clear().unwrap();
        assert!(token.load().is_none());

        // Clearing twice is fine
        token.clear().unwrap();
    }

    #[test]
    fn test_blank_token_is_absent() {
        let store = MemoryStore::new();
        store.set("token", "   ").unwrap();
        let token = PersistedToken::new(store, "token");
        assert!(token.load().is_none());
    }
}
