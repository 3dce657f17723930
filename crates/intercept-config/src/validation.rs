//! Full configuration validation.
//!
//! Every problem is collected so a single error reports the whole config.

use std::sync::LazyLock;

use intercept_common::{ConfigError, EmitPolicy};
use regex::Regex;

use crate::schema::{InterceptConfig, KeyboardEntry, LOG_LEVELS};

/// DOM event type names: `contextmenu`, `touchstart`, `my-event`, `ns:event`.
static EVENT_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_:-]*$").unwrap());

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &InterceptConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    for (i, entry) in config.keyboard.iter().enumerate() {
        validate_keyboard_entry(&mut errors, i, entry);
    }

    for (i, entry) in config.pointer.iter().enumerate() {
        if !is_valid_event_name(&entry.event) {
            errors.push(format!("pointer[{i}].event '{}' is not a DOM event name", entry.event));
        }
    }

    if let Some(EmitPolicy::Custom(label)) = &config.emit_policy {
        if label.trim().is_empty() {
            errors.push("emit_policy.custom must name a window label".into());
        }
    }

    if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
        errors.push(format!(
            "logging.level '{}' must be one of {}",
            config.logging.level,
            LOG_LEVELS.join(", ")
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

/// Whether `name` looks like a DOM event type.
pub fn is_valid_event_name(name: &str) -> bool {
    EVENT_NAME_RE.is_match(name)
}

fn validate_keyboard_entry(errors: &mut Vec<String>, i: usize, entry: &KeyboardEntry) {
    match entry.spec_count() {
        0 => {
            errors.push(format!("keyboard[{i}] needs one of key, keys, or combo"));
            return;
        }
        1 => {}
        _ => {
            errors.push(format!("keyboard[{i}] sets more than one of key, keys, combo"));
            return;
        }
    }

    if let Some(key) = &entry.key {
        if key.is_empty() {
            errors.push(format!("keyboard[{i}].key is empty"));
        }
    }

    if let Some(keys) = &entry.keys {
        if keys.is_empty() {
            errors.push(format!("keyboard[{i}].keys is empty"));
        } else if keys.iter().any(|k| k.is_empty()) {
            errors.push(format!("keyboard[{i}].keys contains an empty key"));
        }
    }

    if let Some(combo) = &entry.combo {
        if combo.trim().is_empty() {
            errors.push(format!("keyboard[{i}].combo is empty"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::PointerEntry;

    fn with_keyboard(entries: Vec<KeyboardEntry>) -> InterceptConfig {
        InterceptConfig {
            keyboard: entries,
            ..Default::default()
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&InterceptConfig::default()).is_ok());
    }

    #[test]
    fn keyboard_entry_needs_a_key() {
        let config = with_keyboard(vec![KeyboardEntry {
            ctrl: true,
            ..Default::default()
        }]);
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("keyboard[0] needs one of key, keys, or combo"));
    }

    #[test]
    fn keyboard_entry_rejects_two_specs() {
        let config = with_keyboard(vec![KeyboardEntry {
            key: Some("a".into()),
            keys: Some(vec!["b".into()]),
            ..Default::default()
        }]);
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("more than one"));
    }

    #[test]
    fn empty_key_and_key_sets_are_rejected() {
        let config = with_keyboard(vec![
            KeyboardEntry::key(""),
            KeyboardEntry {
                keys: Some(vec![]),
                ..Default::default()
            },
            KeyboardEntry {
                keys: Some(vec!["a".into(), String::new()]),
                ..Default::default()
            },
            KeyboardEntry::combo("  "),
        ]);
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("keyboard[0].key is empty"));
        assert!(err.contains("keyboard[1].keys is empty"));
        assert!(err.contains("keyboard[2].keys contains an empty key"));
        assert!(err.contains("keyboard[3].combo is empty"));
    }

    #[test]
    fn pointer_event_names() {
        assert!(is_valid_event_name("contextmenu"));
        assert!(is_valid_event_name("touchstart"));
        assert!(is_valid_event_name("app:gesture"));
        assert!(!is_valid_event_name(""));
        assert!(!is_valid_event_name("context menu"));
        assert!(!is_valid_event_name("');alert(1);('"));

        let config = InterceptConfig {
            pointer: vec![PointerEntry::new("bad name")],
            ..Default::default()
        };
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("pointer[0].event"));
    }

    #[test]
    fn custom_policy_needs_label() {
        let config = InterceptConfig {
            emit_policy: Some(EmitPolicy::Custom(String::new())),
            ..Default::default()
        };
        assert!(validate(&config).is_err());
    }

    #[test]
    fn unknown_log_level() {
        let mut config = InterceptConfig::default();
        config.logging.level = "verbose".into();
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("logging.level 'verbose'"));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = with_keyboard(vec![KeyboardEntry::default()]);
        config.pointer.push(PointerEntry::new(""));
        config.logging.level = "loud".into();
        let err = validate(&config).unwrap_err().to_string();
        assert_eq!(err.matches("; ").count(), 2);
    }
}
