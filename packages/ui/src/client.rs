//! Shared client constructor for all platforms.
//!
//! Returns a [`api::TaskClient`] whose session token is persisted in the
//! appropriate [`store::KeyValueStore`]:
//! - **Web** (WASM + `web` feature): `localStorage` via [`store::LocalStorageStore`]
//! - **Native**: one file per key via [`store::FileStore`] under `<data_dir>/taskdesk/`

use store::ClientConfig;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStore = store::LocalStorageStore;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformStore = store::FileStore;

/// The client type every view works with.
pub type AppClient = api::TaskClient<api::HttpTransport, PlatformStore>;

/// Create the platform client and open its session store.
pub fn make_client() -> Result<AppClient, api::TransportError> {
    let config = load_config();
    let transport = api::HttpTransport::new(&config.api)?;
    let session = api::SessionStore::open(platform_store(), &config.storage.token_key);
    Ok(api::TaskClient::new(transport, session))
}

fn load_config() -> ClientConfig {
    #[cfg(target_arch = "wasm32")]
    {
        // No filesystem or process environment in the browser; the backend
        // origin can still be baked in at build time.
        match option_env!("TASKDESK_API__BASE_URL") {
            Some(base_url) => ClientConfig::new(base_url),
            None => ClientConfig::default(),
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        api::settings::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "invalid client settings, using defaults");
            ClientConfig::default()
        })
    }
}

fn platform_store() -> PlatformStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStorageStore::new()
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("taskdesk");
        store::FileStore::new(base)
    }
}
