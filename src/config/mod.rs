// src/config/mod.rs
mod models;
mod secret;

pub use models::*;
pub use secret::SecretString;

use anyhow::{Context, Result};
use ::config::{Environment, File};
use std::path::Path;

/// Prefix for environment overrides, e.g. `HEALTH__REDIS__URL`.
pub const ENV_PREFIX: &str = "HEALTH";

/// Load configuration from an optional file (YAML or JSON, picked by
/// extension) overlaid with `HEALTH__*` environment variables.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();

    let settings = ::config::Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .with_context(|| format!("Failed to read config from {}", path.display()))?;

    let config: Config = settings
        .try_deserialize()
        .context("Failed to parse config")?;

    config.validate()?;
    Ok(config)
}
