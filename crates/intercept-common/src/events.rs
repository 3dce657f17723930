use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::payload::{KeyboardPayload, PointerPayload, KEYBOARD_EVENT, POINTER_EVENT};

/// Which windows a re-broadcast event is addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventTarget {
    All,
    Window(String),
}

impl EventTarget {
    pub fn window(label: impl Into<String>) -> Self {
        Self::Window(label.into())
    }

    /// Whether a subscriber living in `label` should see the event.
    pub fn includes(&self, label: &str) -> bool {
        match self {
            Self::All => true,
            Self::Window(target) => target == label,
        }
    }
}

/// How the relay re-broadcasts received payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmitPolicy {
    /// Every window.
    All,
    /// The window with the given label.
    Custom(String),
    /// The focused window, if any.
    Focused,
    /// Only the window the event came from.
    Origin,
    /// Nothing is re-broadcast.
    #[default]
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    Keyboard {
        target: EventTarget,
        payload: KeyboardPayload,
    },
    Pointer {
        target: EventTarget,
        payload: PointerPayload,
    },
    Shutdown,
    #[serde(other)]
    Unknown,
}

impl Event {
    /// The relay event name, for events that carry a payload.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Self::Keyboard { .. } => Some(KEYBOARD_EVENT),
            Self::Pointer { .. } => Some(POINTER_EVENT),
            Self::Shutdown | Self::Unknown => None,
        }
    }

    pub fn target(&self) -> Option<&EventTarget> {
        match self {
            Self::Keyboard { target, .. } | Self::Pointer { target, .. } => Some(target),
            Self::Shutdown | Self::Unknown => None,
        }
    }
}

/// Process-wide bus the relay publishes on and guest listeners read from.
#[derive(Debug)]
pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    /// Publish an event, returning how many subscribers received it.
    pub fn publish(&self, event: Event) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyboard(target: EventTarget) -> Event {
        Event::Keyboard {
            target,
            payload: KeyboardPayload {
                key: "p".into(),
                ctrl_key: true,
                shift_key: false,
                alt_key: false,
                origin: Some("main".into()),
            },
        }
    }

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(keyboard(EventTarget::All));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.name(), Some(KEYBOARD_EVENT));
        assert!(matches!(event, Event::Keyboard { ref payload, .. } if payload.key == "p"));
    }

    #[tokio::test]
    async fn multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(Event::Shutdown);

        assert!(matches!(rx1.recv().await.unwrap(), Event::Shutdown));
        assert!(matches!(rx2.recv().await.unwrap(), Event::Shutdown));
    }

    #[test]
    fn publish_returns_zero_with_no_subscribers() {
        let bus = EventBus::new(16);
        assert_eq!(bus.publish(Event::Shutdown), 0);
    }

    #[test]
    fn publish_returns_subscriber_count() {
        let bus = EventBus::new(16);
        let _rx1 = bus.subscribe();
        let _rx2 = bus.subscribe();
        assert_eq!(bus.publish(Event::Shutdown), 2);
    }

    #[test]
    fn target_includes() {
        assert!(EventTarget::All.includes("main"));
        assert!(EventTarget::window("main").includes("main"));
        assert!(!EventTarget::window("main").includes("settings"));
    }

    #[test]
    fn event_target_accessor() {
        let event = keyboard(EventTarget::window("main"));
        assert_eq!(event.target(), Some(&EventTarget::window("main")));
        assert!(Event::Shutdown.target().is_none());
        assert!(Event::Shutdown.name().is_none());
    }

    #[test]
    fn emit_policy_defaults_to_none() {
        assert_eq!(EmitPolicy::default(), EmitPolicy::None);
    }

    #[test]
    fn emit_policy_serde_shape() {
        let json = serde_json::to_string(&EmitPolicy::Origin).unwrap();
        assert_eq!(json, r#""origin""#);
        let custom: EmitPolicy = serde_json::from_str(r#"{"custom":"main"}"#).unwrap();
        assert_eq!(custom, EmitPolicy::Custom("main".into()));
    }

    #[test]
    fn unknown_event_deserializes() {
        let json = r#"{"type":"SomethingNew","data":null}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(matches!(event, Event::Unknown));
    }
}
