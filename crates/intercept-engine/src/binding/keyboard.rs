use intercept_common::{BindingError, KeyboardPayload};

use super::key_spec::KeySpec;
use super::modifiers::{ModifierKey, Modifiers};
use crate::keymap::display;

/// A key (or set of keys) plus the exact modifier state it requires.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    spec: KeySpec,
    modifiers: Modifiers,
}

impl KeyBinding {
    /// A single key with no modifiers.
    pub fn new(key: impl Into<String>) -> Self {
        Self::builder(key).build()
    }

    /// Any of the given keys, with no modifiers.
    pub fn any_of<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        KeyBindingBuilder::from_spec(KeySpec::any_of(keys)).build()
    }

    /// Initialize a builder for a single key.
    pub fn builder(key: impl Into<String>) -> KeyBindingBuilder {
        KeyBindingBuilder::from_spec(KeySpec::single(key))
    }

    /// Create a binding with the given key and modifiers.
    pub fn with_modifiers(key: impl Into<String>, modifiers: &[ModifierKey]) -> Self {
        Self::builder(key).modifiers(modifiers).build()
    }

    pub fn with_alt(key: impl Into<String>) -> Self {
        Self::builder(key).alt_key().build()
    }

    pub fn with_ctrl(key: impl Into<String>) -> Self {
        Self::builder(key).ctrl_key().build()
    }

    pub fn with_ctrl_shift(key: impl Into<String>) -> Self {
        Self::builder(key).ctrl_key().shift_key().build()
    }

    pub fn with_meta(key: impl Into<String>) -> Self {
        Self::builder(key).meta_key().build()
    }

    pub fn with_shift(key: impl Into<String>) -> Self {
        Self::builder(key).shift_key().build()
    }

    pub fn with_shift_alt(key: impl Into<String>) -> Self {
        Self::builder(key).shift_key().alt_key().build()
    }

    pub fn spec(&self) -> &KeySpec {
        &self.spec
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn validate(&self) -> Result<(), BindingError> {
        match &self.spec {
            KeySpec::Single(key) if key.is_empty() => Err(BindingError::EmptyKey),
            KeySpec::AnyOf(keys) if keys.is_empty() => Err(BindingError::EmptyKeySet),
            KeySpec::AnyOf(keys) if keys.iter().any(String::is_empty) => {
                Err(BindingError::EmptyKey)
            }
            _ => Ok(()),
        }
    }

    /// Payload forwarded when `event_key` matched this binding.
    ///
    /// A single-key binding reports its own key text; a set reports the
    /// member that was pressed. Modifier flags are the declared ones.
    pub fn payload(&self, event_key: &str) -> KeyboardPayload {
        let key = match &self.spec {
            KeySpec::Single(key) => key.clone(),
            KeySpec::AnyOf(_) => event_key.to_owned(),
        };
        KeyboardPayload {
            key,
            ctrl_key: self.modifiers.ctrl,
            shift_key: self.modifiers.shift,
            alt_key: self.modifiers.alt,
            origin: None,
        }
    }

    /// Shortcut ids, one per key, e.g. `keyboard:ctrl+shift+i`.
    pub fn shortcut_ids(&self) -> Vec<String> {
        let modifiers = self.modifiers.keys();
        self.spec
            .keys()
            .into_iter()
            .map(|key| display::keyboard(key, &modifiers))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct KeyBindingBuilder {
    spec: KeySpec,
    modifiers: Modifiers,
}

impl KeyBindingBuilder {
    pub fn from_spec(spec: KeySpec) -> Self {
        Self {
            spec,
            modifiers: Modifiers::NONE,
        }
    }

    /// Add a modifier to the binding.
    #[must_use]
    pub fn modifier(mut self, modifier: ModifierKey) -> Self {
        self.modifiers = self.modifiers.with(modifier);
        self
    }

    /// Add multiple modifiers to the binding.
    #[must_use]
    pub fn modifiers(self, modifiers: &[ModifierKey]) -> Self {
        modifiers.iter().fold(self, |b, m| b.modifier(*m))
    }

    #[must_use]
    pub fn alt_key(self) -> Self {
        self.modifier(ModifierKey::AltKey)
    }

    #[must_use]
    pub fn ctrl_key(self) -> Self {
        self.modifier(ModifierKey::CtrlKey)
    }

    #[must_use]
    pub fn meta_key(self) -> Self {
        self.modifier(ModifierKey::MetaKey)
    }

    #[must_use]
    pub fn shift_key(self) -> Self {
        self.modifier(ModifierKey::ShiftKey)
    }

    pub fn build(self) -> KeyBinding {
        KeyBinding {
            spec: self.spec,
            modifiers: self.modifiers,
        }
    }
}
