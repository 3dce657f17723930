use intercept_common::BindingError;

use crate::binding::{KeyBinding, ModifierKey};

/// Parses a human-readable keybind string like `"Ctrl+Shift+I"`,
/// `"Cmd+S"`, or `"Option+Period"` into a [`KeyBinding`].
///
/// Normalization rules:
/// - `"Cmd"` / `"Command"` -> meta on macOS, ctrl elsewhere
/// - `"Option"` / `"Opt"` / `"Alt"` -> alt
/// - `"Control"` / `"Ctrl"` -> ctrl
/// - `"Win"` / `"Super"` / `"Meta"` -> meta
/// - `"Shift"` -> shift
///
/// The last token is always the key. Named keys map to their DOM
/// `KeyboardEvent.key` values; single characters keep the case they were
/// written in.
pub fn parse_keybind(s: &str) -> Result<KeyBinding, BindingError> {
    let invalid = |reason: &str| BindingError::InvalidKeybind {
        combo: s.to_owned(),
        reason: reason.to_owned(),
    };

    let tokens: Vec<&str> = s.split('+').map(str::trim).collect();
    let Some((key, modifier_tokens)) = tokens.split_last() else {
        return Err(invalid("empty keybind string"));
    };

    if key.is_empty() {
        return Err(if tokens.len() == 1 {
            invalid("empty keybind string")
        } else {
            invalid("keybind has no key component")
        });
    }

    let mut modifiers = Vec::new();
    for token in modifier_tokens {
        match normalize_modifier(token) {
            Some(modifier) => {
                if !modifiers.contains(&modifier) {
                    modifiers.push(modifier);
                }
            }
            None => return Err(invalid(&format!("unrecognized modifier: {token}"))),
        }
    }

    Ok(KeyBinding::builder(normalize_key_name(key))
        .modifiers(&modifiers)
        .build())
}

fn normalize_modifier(token: &str) -> Option<ModifierKey> {
    match token.to_lowercase().as_str() {
        "ctrl" | "control" => Some(ModifierKey::CtrlKey),
        "alt" | "option" | "opt" => Some(ModifierKey::AltKey),
        "shift" => Some(ModifierKey::ShiftKey),
        "cmd" | "command" => {
            if cfg!(target_os = "macos") {
                Some(ModifierKey::MetaKey)
            } else {
                Some(ModifierKey::CtrlKey)
            }
        }
        "super" | "win" | "meta" => Some(ModifierKey::MetaKey),
        _ => None,
    }
}

fn normalize_key_name(token: &str) -> String {
    if token.chars().count() == 1 {
        return token.to_owned();
    }

    let lower = token.to_lowercase();
    match lower.as_str() {
        "period" => ".".into(),
        "comma" => ",".into(),
        "slash" => "/".into(),
        "backslash" => "\\".into(),
        "space" => " ".into(),
        "enter" | "return" => "Enter".into(),
        "escape" | "esc" => "Escape".into(),
        "tab" => "Tab".into(),
        "backspace" => "Backspace".into(),
        "delete" | "del" => "Delete".into(),
        "up" => "ArrowUp".into(),
        "down" => "ArrowDown".into(),
        "left" => "ArrowLeft".into(),
        "right" => "ArrowRight".into(),
        "home" => "Home".into(),
        "end" => "End".into(),
        "pageup" => "PageUp".into(),
        "pagedown" => "PageDown".into(),
        _ => {
            let mut chars = lower.chars();
            match chars.next() {
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    format!("{upper}{}", chars.as_str())
                }
                None => lower,
            }
        }
    }
}
