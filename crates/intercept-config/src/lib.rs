//! Intercept configuration system.
//!
//! A single TOML file describes which shortcuts and pointer events are
//! intercepted, whether suppressed events are forwarded to the host, and how
//! the host re-broadcasts them. All sections use `serde(default)` so partial
//! configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use intercept_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{InterceptConfig, KeyboardEntry, LoggingConfig, PointerEntry, Preset};

use intercept_common::ConfigError;

/// Load config from the platform default path.
///
/// Creates a documented default file if none exists.
pub fn load_config() -> Result<InterceptConfig, ConfigError> {
    toml_loader::load_default()
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &InterceptConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let config = InterceptConfig::default();
        let json = config_to_json(&config);
        assert!(json.contains("\"emit\""));
        assert!(json.contains("\"presets\""));
        assert!(json.contains("\"keyboard\""));
        assert!(json.contains("\"pointer\""));
        assert!(json.contains("\"logging\""));
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let config = InterceptConfig::default();
        let json = config_to_json(&config);
        let parsed: InterceptConfig = serde_json::from_str(&json).unwrap();
        assert!(!parsed.emit);
        assert_eq!(parsed.presets.len(), Preset::ALL.len());
        assert_eq!(parsed.logging.level, "info");
    }
}
