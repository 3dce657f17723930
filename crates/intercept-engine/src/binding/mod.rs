//! Bindings: the rules that decide which events get suppressed.

mod key_spec;
mod keyboard;
mod modifiers;
mod pointer;

use intercept_common::BindingError;

pub use key_spec::{KeyPredicate, KeySpec};
pub use keyboard::{KeyBinding, KeyBindingBuilder};
pub use modifiers::{ModifierKey, ModifierMatcher, Modifiers};
pub use pointer::{PointerBinding, CONTEXT_MENU};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    Keyboard(KeyBinding),
    Pointer(PointerBinding),
}

impl Binding {
    pub fn is_keyboard(&self) -> bool {
        matches!(self, Binding::Keyboard(_))
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, Binding::Pointer(_))
    }

    pub fn validate(&self) -> Result<(), BindingError> {
        match self {
            Binding::Keyboard(it) => it.validate(),
            Binding::Pointer(it) => it.validate(),
        }
    }

    pub fn shortcut_ids(&self) -> Vec<String> {
        match self {
            Binding::Keyboard(it) => it.shortcut_ids(),
            Binding::Pointer(it) => vec![it.shortcut_id()],
        }
    }
}

impl From<KeyBinding> for Binding {
    fn from(value: KeyBinding) -> Self {
        Binding::Keyboard(value)
    }
}

impl From<PointerBinding> for Binding {
    fn from(value: PointerBinding) -> Self {
        Binding::Pointer(value)
    }
}
