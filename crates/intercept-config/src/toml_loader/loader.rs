//! Core TOML config loading: read from path or platform default.

use crate::schema::InterceptConfig;
use crate::validation;
use intercept_common::ConfigError;
use std::path::Path;
use tracing::info;

use super::paths::{create_default_config, default_config_path};

/// Parse and validate config from TOML text.
pub fn load_from_str(content: &str) -> Result<InterceptConfig, ConfigError> {
    let config: InterceptConfig = toml::from_str(content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    validation::validate(&config)?;
    Ok(config)
}

/// Load config from a specific TOML file path.
///
/// Missing fields fall back to serde defaults. An invalid config is an
/// error: the bindings are baked into the injected script, so there is no
/// later point at which to recover.
pub fn load_from_path(path: &Path) -> Result<InterceptConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config = load_from_str(&content)?;
    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/intercept/config.toml`
/// On Linux: `~/.config/intercept/config.toml`
///
/// If the file does not exist, creates a default config file and returns defaults.
pub fn load_default() -> Result<InterceptConfig, ConfigError> {
    let path = default_config_path()?;

    if !path.exists() {
        info!("no config found at {}, creating default", path.display());
        create_default_config(&path)?;
        return Ok(InterceptConfig::default());
    }

    load_from_path(&path)
}
