// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::RawJobConfig;
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw `RawJobConfig`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. That happens in `JobConfig::try_from` and in each step.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawJobConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawJobConfig = toml::from_str(&contents)?;

    Ok(config)
}

/// Load the raw configuration, tolerating a missing file only when it is the
/// default location.
///
/// An explicitly requested config that does not exist is an error; a missing
/// `Drupalci.toml` just means "use defaults and CLI flags".
pub fn load_or_default(path: impl AsRef<Path>, explicit: bool) -> Result<RawJobConfig> {
    let path = path.as_ref();
    if !explicit && !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(RawJobConfig::default());
    }
    load_from_path(path)
}

/// Default config location, relative to the current directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Drupalci.toml")
}
