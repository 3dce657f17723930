use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A modifier key as named on a DOM `KeyboardEvent`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModifierKey {
    CtrlKey,
    ShiftKey,
    AltKey,
    MetaKey,
}

impl ModifierKey {
    fn precedence(self) -> u8 {
        match self {
            ModifierKey::CtrlKey => 0,
            ModifierKey::ShiftKey => 1,
            ModifierKey::AltKey => 2,
            ModifierKey::MetaKey => 3,
        }
    }

    /// The `KeyboardEvent` property name (`ctrlKey`, ...).
    pub fn property(self) -> &'static str {
        match self {
            ModifierKey::CtrlKey => "ctrlKey",
            ModifierKey::ShiftKey => "shiftKey",
            ModifierKey::AltKey => "altKey",
            ModifierKey::MetaKey => "metaKey",
        }
    }
}

impl PartialOrd for ModifierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ModifierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.precedence().cmp(&other.precedence())
    }
}

/// Exact modifier state. Unspecified modifiers are `false`.
///
/// Used both for what a binding requires and for what an event reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        alt: false,
        ctrl: false,
        shift: false,
        meta: false,
    };

    pub fn from_keys(keys: &[ModifierKey]) -> Self {
        keys.iter().fold(Self::NONE, |m, k| m.with(*k))
    }

    #[must_use]
    pub fn with(mut self, key: ModifierKey) -> Self {
        match key {
            ModifierKey::AltKey => self.alt = true,
            ModifierKey::CtrlKey => self.ctrl = true,
            ModifierKey::ShiftKey => self.shift = true,
            ModifierKey::MetaKey => self.meta = true,
        }
        self
    }

    /// Pressed modifiers, ordered ctrl, shift, alt, meta.
    pub fn keys(&self) -> Vec<ModifierKey> {
        let mut keys = Vec::with_capacity(4);
        if self.ctrl {
            keys.push(ModifierKey::CtrlKey);
        }
        if self.shift {
            keys.push(ModifierKey::ShiftKey);
        }
        if self.alt {
            keys.push(ModifierKey::AltKey);
        }
        if self.meta {
            keys.push(ModifierKey::MetaKey);
        }
        keys
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

/// Compares an event's modifier state against a binding's requirement.
///
/// Matching is exact: every tracked flag must be equal, so a binding that
/// requires nothing does not fire while ctrl is held. `meta` only takes part
/// when tracked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModifierMatcher {
    required: Modifiers,
    track_meta: bool,
}

impl ModifierMatcher {
    pub fn new(required: Modifiers, track_meta: bool) -> Self {
        Self {
            required,
            track_meta,
        }
    }

    pub fn matches(&self, state: &Modifiers) -> bool {
        state.alt == self.required.alt
            && state.ctrl == self.required.ctrl
            && state.shift == self.required.shift
            && (!self.track_meta || state.meta == self.required.meta)
    }
}
