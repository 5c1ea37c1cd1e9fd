//! # Client configuration: `taskdesk.toml`
//!
//! Defines the TOML configuration read by the client at startup (filename:
//! [`ClientConfig::filename`] = `"taskdesk.toml"`). It says where the backend
//! lives and under which key the session token is persisted.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8000"
//! timeout_secs = 10
//!
//! [storage]
//! token_key = "token"
//! ```
//!
//! All structs implement `Default` with production defaults, so a missing or
//! empty file is equivalent to the default configuration. Reading the file and
//! layering environment variables over it happens in `api::settings`.

use serde::Deserialize;

/// Top-level configuration stored in `taskdesk.toml`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Backend connection settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ApiConfig {
    /// Origin of the REST backend, without a trailing path.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds. 0 disables the client-side timeout.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Client-side persistence settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct StorageConfig {
    /// Key the bearer token is persisted under.
    #[serde(default = "default_token_key")]
    pub token_key: String,
}

fn default_token_key() -> String {
    "token".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            token_key: default_token_key(),
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at the given backend.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into(),
                ..ApiConfig::default()
            },
            storage: StorageConfig::default(),
        }
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "taskdesk.toml"
    }
}
