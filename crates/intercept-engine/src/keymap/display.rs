use std::collections::BTreeSet;

use crate::binding::{KeyBinding, KeySpec, ModifierKey};

/// Canonical id for a keyboard shortcut, e.g. `keyboard:ctrl+shift+i`.
///
/// Modifiers are de-duplicated and ordered ctrl, shift, alt, meta; the key
/// is lowercased.
pub fn keyboard(key: &str, modifiers: &[ModifierKey]) -> String {
    let mut buf = String::from("keyboard:");
    buf.reserve(key.len().saturating_add(modifiers.len().saturating_mul(6)));

    for modifier in modifiers.iter().collect::<BTreeSet<_>>() {
        match modifier {
            ModifierKey::CtrlKey => buf.push_str("ctrl+"),
            ModifierKey::ShiftKey => buf.push_str("shift+"),
            ModifierKey::AltKey => buf.push_str("alt+"),
            ModifierKey::MetaKey => buf.push_str("meta+"),
        }
    }

    buf.push_str(&key.to_lowercase());
    buf
}

/// Canonical id for a pointer shortcut, e.g. `pointer:contextmenu`.
pub fn pointer(event: &str) -> String {
    format!("pointer:{event}")
}

/// Converts a [`KeyBinding`] into a platform-appropriate display string.
///
/// On macOS, modifiers are displayed as symbols. On other platforms, they
/// are displayed as text names separated by `+`. Key sets render as
/// `{a|b}`.
pub fn keybind_to_display(kb: &KeyBinding) -> String {
    let mut parts: Vec<String> = kb
        .modifiers()
        .keys()
        .into_iter()
        .map(display_modifier)
        .collect();

    parts.push(match kb.spec() {
        KeySpec::Single(key) => display_key(key),
        KeySpec::AnyOf(keys) => {
            let keys: Vec<String> = keys.iter().map(|k| display_key(k)).collect();
            format!("{{{}}}", keys.join("|"))
        }
    });

    if cfg!(target_os = "macos") {
        parts.concat()
    } else {
        parts.join("+")
    }
}

fn display_modifier(modifier: ModifierKey) -> String {
    if cfg!(target_os = "macos") {
        match modifier {
            ModifierKey::CtrlKey => "\u{2303}".into(),  // ⌃
            ModifierKey::AltKey => "\u{2325}".into(),   // ⌥
            ModifierKey::ShiftKey => "\u{21E7}".into(), // ⇧
            ModifierKey::MetaKey => "\u{2318}".into(),  // ⌘
        }
    } else {
        match modifier {
            ModifierKey::CtrlKey => "Ctrl".into(),
            ModifierKey::AltKey => "Alt".into(),
            ModifierKey::ShiftKey => "Shift".into(),
            ModifierKey::MetaKey => {
                if cfg!(target_os = "windows") {
                    "Win".into()
                } else {
                    "Super".into()
                }
            }
        }
    }
}

fn display_key(key: &str) -> String {
    match key {
        " " => "Space".into(),
        _ => key.to_owned(),
    }
}
