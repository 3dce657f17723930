//! Event snapshots and the event-source abstraction.
//!
//! The engine never reaches for a global `window`: whatever owns the events
//! implements [`EventSource`] and the engine registers its listeners there.

use std::cell::Cell;

use crate::binding::{ModifierKey, Modifiers};

/// DOM event type the keyboard handler listens to.
pub const KEYDOWN: &str = "keydown";

/// A raw input event as seen at dispatch time.
///
/// Listeners only read it, apart from flagging the default action as
/// prevented.
#[derive(Debug)]
pub struct DomEvent {
    event_type: String,
    key: Option<String>,
    modifiers: Modifiers,
    default_prevented: Cell<bool>,
}

impl DomEvent {
    /// A `keydown` for `key` with no modifiers held.
    pub fn keydown(key: impl Into<String>) -> Self {
        Self {
            event_type: KEYDOWN.to_owned(),
            key: Some(key.into()),
            modifiers: Modifiers::NONE,
            default_prevented: Cell::new(false),
        }
    }

    /// A non-keyboard event of the given type.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            key: None,
            modifiers: Modifiers::NONE,
            default_prevented: Cell::new(false),
        }
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn with(mut self, modifier: ModifierKey) -> Self {
        self.modifiers = self.modifiers.with(modifier);
        self
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

pub type Listener = Box<dyn Fn(&DomEvent)>;

/// Anything that can register a listener for an event type.
pub trait EventSource {
    fn add_event_listener(&mut self, event_type: &str, listener: Listener);
}

/// In-memory event target.
///
/// Listeners run synchronously, in registration order, for every dispatched
/// event whose type matches.
#[derive(Default)]
pub struct EventTarget {
    listeners: Vec<(String, Listener)>,
}

impl EventTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch an event. Returns `false` if a listener prevented the
    /// default action, like `EventTarget.dispatchEvent`.
    pub fn dispatch(&self, event: &DomEvent) -> bool {
        for (event_type, listener) in &self.listeners {
            if event_type == event.event_type() {
                listener(event);
            }
        }
        !event.default_prevented()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn listener_count_for(&self, event_type: &str) -> usize {
        self.listeners
            .iter()
            .filter(|(t, _)| t == event_type)
            .count()
    }
}

impl EventSource for EventTarget {
    fn add_event_listener(&mut self, event_type: &str, listener: Listener) {
        self.listeners.push((event_type.to_owned(), listener));
    }
}

impl std::fmt::Debug for EventTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventTarget")
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
