//! Custom keyboard and pointer binding entries.

use serde::{Deserialize, Serialize};

/// A `[[keyboard]]` entry.
///
/// Exactly one of `key`, `keys`, or `combo` must be set. `combo` takes a
/// string such as `"Ctrl+Shift+I"`; the boolean flags are added to whatever
/// modifiers the combo names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardEntry {
    /// A single key, compared case-insensitively.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Any of these keys, compared case-sensitively.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combo: Option<String>,
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub meta: bool,
}

impl KeyboardEntry {
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Default::default()
        }
    }

    pub fn combo(combo: impl Into<String>) -> Self {
        Self {
            combo: Some(combo.into()),
            ..Default::default()
        }
    }

    /// How many of `key`, `keys`, `combo` are set.
    pub(crate) fn spec_count(&self) -> usize {
        [self.key.is_some(), self.keys.is_some(), self.combo.is_some()]
            .into_iter()
            .filter(|set| *set)
            .count()
    }
}

/// A `[[pointer]]` entry: a DOM event type blocked unconditionally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerEntry {
    pub event: String,
}

impl PointerEntry {
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
        }
    }
}
