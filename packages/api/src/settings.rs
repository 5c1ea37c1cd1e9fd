//! Client settings, layered with the `config` crate.
//!
//! Precedence, lowest first: built-in defaults, `taskdesk.toml` in the working
//! directory (optional), then `TASKDESK_*` environment variables, with `__`
//! between section and key (`TASKDESK_API__BASE_URL`). On native targets a
//! `.env` file is read into the environment first.

use std::path::Path;

use config::{Config, ConfigError, Environment, File, FileFormat};
use store::ClientConfig;

pub const ENV_PREFIX: &str = "TASKDESK";

pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

pub fn load() -> Result<ClientConfig, ConfigError> {
    #[cfg(not(target_arch = "wasm32"))]
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            tracing::warn!(error = %e, "ignoring unreadable .env file");
        }
    }
    load_from(Path::new(ClientConfig::filename()), environment())
}

pub fn load_from(file: &Path, env: Environment) -> Result<ClientConfig, ConfigError> {
    let defaults = ClientConfig::default();
    let config = Config::builder()
        .set_default("api.base_url", defaults.api.base_url)?
        .set_default(
            "api.timeout_secs",
            i64::try_from(defaults.api.timeout_secs).unwrap_or(i64::MAX),
        )?
        .set_default("storage.token_key", defaults.storage.token_key)?
        .add_source(
            File::from(file)
                .format(FileFormat::Toml)
                .required(false),
        )
        .add_source(env)
        .build()?;

    let settings: ClientConfig = config.try_deserialize()?;
    tracing::debug!(base_url = %settings.api.base_url, "client settings loaded");
    Ok(settings)
}
