pub mod config;
pub mod kv;
pub mod token;

mod file_store;
pub use file_store::FileStore;

mod memory;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageStore;

pub use config::{ApiConfig, ClientConfig, StorageConfig};
pub use kv::{KeyValueStore, StoreError};
pub use token::PersistedToken;
