use intercept_common::{BindingError, PointerPayload};

use crate::keymap::display;

/// DOM event type of the context menu gesture.
pub const CONTEXT_MENU: &str = "contextmenu";

/// A pointer or touch event type that is suppressed whenever it fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerBinding {
    event: String,
}

impl PointerBinding {
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
        }
    }

    pub fn context_menu() -> Self {
        Self::new(CONTEXT_MENU)
    }

    /// The DOM event type name.
    pub fn event(&self) -> &str {
        &self.event
    }

    pub fn validate(&self) -> Result<(), BindingError> {
        if self.event.is_empty() {
            Err(BindingError::EmptyEventName)
        } else {
            Ok(())
        }
    }

    pub fn payload(&self) -> PointerPayload {
        PointerPayload {
            event: self.event.clone(),
            origin: None,
        }
    }

    pub fn shortcut_id(&self) -> String {
        display::pointer(&self.event)
    }
}
