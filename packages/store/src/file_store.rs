//! # Filesystem-backed key-value store
//!
//! [`FileStore`] persists each key as a small file under a base directory. It
//! is used on desktop and mobile platforms to keep the session token across
//! app restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── <key>          # raw value, e.g. the bearer token
//! ```
//!
//! ## Platform data directories
//!
//! Use `dirs::data_dir()` to obtain a platform-appropriate base:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS / iOS | `~/Library/Application Support/taskdesk/` |
//! | Linux | `~/.local/share/taskdesk/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\taskdesk\` |

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::kv::{KeyValueStore, StoreError};

/// Filesystem-backed KeyValueStore for desktop and mobile persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Keys are flattened so a key can never escape the base directory.
    fn value_path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base.join(name)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.value_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.base)?;
        std::fs::write(self.value_path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.value_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
