//! Where the config file lives, and writing the documented default.

use std::path::{Path, PathBuf};

use intercept_common::ConfigError;
use tracing::info;

use super::template::default_config_toml;

/// Directory under the platform config dir.
pub const APP_DIR: &str = "intercept";
pub const FILE_NAME: &str = "config.toml";

/// `<base>/intercept/config.toml`.
pub fn config_path_in(base: &Path) -> PathBuf {
    base.join(APP_DIR).join(FILE_NAME)
}

/// The platform default, e.g. `~/.config/intercept/config.toml` on Linux.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|base| config_path_in(&base))
        .ok_or_else(|| ConfigError::ParseError("no platform config directory".into()))
}

/// Write the documented default file at `path`, creating parent directories.
///
/// An existing file is never overwritten; returns whether one was written.
pub fn create_default_config(path: &Path) -> Result<bool, ConfigError> {
    if path.exists() {
        return Ok(false);
    }

    let write_err = |what: &Path, e: std::io::Error| {
        ConfigError::ParseError(format!("cannot write {}: {e}", what.display()))
    };

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| write_err(dir, e))?;
    }
    std::fs::write(path, default_config_toml()).map_err(|e| write_err(path, e))?;

    info!(path = %path.display(), "default intercept config written");
    Ok(true)
}
