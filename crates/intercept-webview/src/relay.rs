//! Host relay: receives forwarded payloads and re-broadcasts them.
//!
//! Every call coming out of a web view is tagged with the label of the
//! window it came from. The relay then runs the host-side listeners
//! registered for the shortcut, and publishes the payload on the
//! [`EventBus`] to whichever windows the [`EmitPolicy`] selects.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use intercept_common::{
    BridgeError, EmitPolicy, Event, EventBus, EventTarget, Invocation, KeyboardPayload,
    ListenerId, PointerPayload, KEYBOARD_COMMAND, POINTER_COMMAND,
};
use intercept_engine::keymap::{keyboard_id, pointer_id};
use intercept_engine::{InboundCall, ModifierKey};
use serde::de::DeserializeOwned;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Host-side callback for a shortcut, given the originating window label.
pub type ShortcutListener = Arc<dyn Fn(&str) + Send + Sync>;

type ListenerMap = HashMap<String, Vec<(ListenerId, ShortcutListener)>>;

pub struct Relay {
    bus: Arc<EventBus>,
    policy: EmitPolicy,
    listeners: Mutex<ListenerMap>,
    focused: Mutex<Option<String>>,
}

impl Relay {
    pub fn new(bus: Arc<EventBus>, policy: EmitPolicy) -> Self {
        Self {
            bus,
            policy,
            listeners: Mutex::new(HashMap::new()),
            focused: Mutex::new(None),
        }
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    pub fn policy(&self) -> &EmitPolicy {
        &self.policy
    }

    /// Register a listener for a shortcut id such as `keyboard:ctrl+s`.
    pub fn listen<F>(&self, shortcut: impl Into<String>, listener: F) -> ListenerId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.listen_shared(shortcut, Arc::new(listener))
    }

    pub fn listen_shared(&self, shortcut: impl Into<String>, listener: ShortcutListener) -> ListenerId {
        let id = ListenerId::new();
        if let Ok(mut map) = self.listeners.lock() {
            map.entry(shortcut.into())
                .or_default()
                .push((id.clone(), listener));
        }
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unlisten(&self, id: &ListenerId) -> bool {
        let Ok(mut map) = self.listeners.lock() else {
            return false;
        };
        let mut removed = false;
        map.retain(|_, entries| {
            let before = entries.len();
            entries.retain(|(entry, _)| entry != id);
            removed |= entries.len() != before;
            !entries.is_empty()
        });
        removed
    }

    pub fn listener_count(&self, shortcut: &str) -> usize {
        self.listeners
            .lock()
            .map(|map| map.get(shortcut).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    /// Record which window has focus, for [`EmitPolicy::Focused`].
    pub fn set_focused(&self, window: Option<String>) {
        if let Ok(mut focused) = self.focused.lock() {
            *focused = window;
        }
    }

    pub fn focused(&self) -> Option<String> {
        self.focused.lock().ok().and_then(|f| f.clone())
    }

    /// Process one call forwarded from `call.window`.
    ///
    /// Returns how many subscribers the re-broadcast reached.
    pub fn handle(&self, call: &InboundCall) -> Result<usize, BridgeError> {
        let window = call.window.as_str();
        let invocation = &call.invocation;

        match invocation.command.as_str() {
            KEYBOARD_COMMAND => {
                let mut payload: KeyboardPayload = decode(invocation)?;
                debug!(window = %window, key = %payload.key, "keyboard payload received");

                let mut modifiers = Vec::with_capacity(3);
                if payload.ctrl_key {
                    modifiers.push(ModifierKey::CtrlKey);
                }
                if payload.shift_key {
                    modifiers.push(ModifierKey::ShiftKey);
                }
                if payload.alt_key {
                    modifiers.push(ModifierKey::AltKey);
                }
                self.call_listeners(&keyboard_id(&payload.key, &modifiers), window);

                payload.origin = Some(window.to_owned());
                Ok(self.emit(window, |target| Event::Keyboard { target, payload }))
            }
            POINTER_COMMAND => {
                let mut payload: PointerPayload = decode(invocation)?;
                debug!(window = %window, event = %payload.event, "pointer payload received");

                self.call_listeners(&pointer_id(&payload.event), window);

                payload.origin = Some(window.to_owned());
                Ok(self.emit(window, |target| Event::Pointer { target, payload }))
            }
            other => Err(BridgeError::UnknownCommand(other.to_owned())),
        }
    }

    /// Drain forwarded calls on a background task until every sender is gone.
    pub fn spawn(self: Arc<Self>, mut receiver: mpsc::UnboundedReceiver<InboundCall>) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(call) = receiver.recv().await {
                if let Err(e) = self.handle(&call) {
                    warn!(window = %call.window, error = %e, "forwarded call dropped");
                }
            }
            debug!("relay channel closed");
        })
    }

    fn call_listeners(&self, shortcut: &str, window: &str) {
        let listeners: Vec<ShortcutListener> = match self.listeners.lock() {
            Ok(map) => map
                .get(shortcut)
                .map(|entries| entries.iter().map(|(_, l)| Arc::clone(l)).collect())
                .unwrap_or_default(),
            Err(_) => return,
        };

        for listener in listeners {
            listener(window);
        }
    }

    fn target(&self, window: &str) -> Option<EventTarget> {
        match &self.policy {
            EmitPolicy::All => Some(EventTarget::All),
            EmitPolicy::Custom(label) => Some(EventTarget::window(label.as_str())),
            EmitPolicy::Focused => self.focused().map(EventTarget::Window),
            EmitPolicy::Origin => Some(EventTarget::window(window)),
            EmitPolicy::None => None,
        }
    }

    fn emit(&self, window: &str, event: impl FnOnce(EventTarget) -> Event) -> usize {
        match self.target(window) {
            Some(target) => self.bus.publish(event(target)),
            None => 0,
        }
    }
}

impl std::fmt::Debug for Relay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relay")
            .field("policy", &self.policy)
            .field("focused", &self.focused())
            .finish_non_exhaustive()
    }
}

fn decode<P: DeserializeOwned>(invocation: &Invocation) -> Result<P, BridgeError> {
    serde_json::from_value(invocation.payload.clone()).map_err(|source| BridgeError::InvalidPayload {
        command: invocation.command.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn keyboard_call(window: &str, key: &str, ctrl: bool) -> InboundCall {
        InboundCall {
            window: window.into(),
            invocation: Invocation::new(
                KEYBOARD_COMMAND,
                json!({"key": key, "ctrlKey": ctrl, "shiftKey": false, "altKey": false}),
            ),
        }
    }

    fn pointer_call(window: &str, event: &str) -> InboundCall {
        InboundCall {
            window: window.into(),
            invocation: Invocation::new(POINTER_COMMAND, json!({"event": event})),
        }
    }

    fn relay(policy: EmitPolicy) -> Relay {
        Relay::new(Arc::new(EventBus::new(16)), policy)
    }

    #[tokio::test]
    async fn tags_origin_and_broadcasts() {
        let relay = relay(EmitPolicy::All);
        let mut rx = relay.bus().subscribe();

        assert_eq!(relay.handle(&keyboard_call("main", "s", true)).unwrap(), 1);

        match rx.recv().await.unwrap() {
            Event::Keyboard { target, payload } => {
                assert_eq!(target, EventTarget::All);
                assert_eq!(payload.key, "s");
                assert!(payload.ctrl_key);
                assert_eq!(payload.origin.as_deref(), Some("main"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn pointer_payload_is_relayed() {
        let relay = relay(EmitPolicy::Origin);
        let mut rx = relay.bus().subscribe();

        relay.handle(&pointer_call("settings", "contextmenu")).unwrap();

        match rx.recv().await.unwrap() {
            Event::Pointer { target, payload } => {
                assert_eq!(target, EventTarget::window("settings"));
                assert_eq!(payload.event, "contextmenu");
                assert_eq!(payload.origin.as_deref(), Some("settings"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn policy_selects_target() {
        let relay = relay(EmitPolicy::Custom("overlay".into()));
        let mut rx = relay.bus().subscribe();
        relay.handle(&keyboard_call("main", "s", true)).unwrap();
        assert_eq!(
            rx.recv().await.unwrap().target(),
            Some(&EventTarget::window("overlay"))
        );
    }

    #[test]
    fn none_policy_publishes_nothing() {
        let relay = relay(EmitPolicy::None);
        let _rx = relay.bus().subscribe();
        assert_eq!(relay.handle(&keyboard_call("main", "s", true)).unwrap(), 0);
    }

    #[tokio::test]
    async fn focused_policy_needs_a_focused_window() {
        let relay = relay(EmitPolicy::Focused);
        let mut rx = relay.bus().subscribe();

        assert_eq!(relay.handle(&keyboard_call("main", "s", true)).unwrap(), 0);

        relay.set_focused(Some("editor".into()));
        relay.handle(&keyboard_call("main", "s", true)).unwrap();
        assert_eq!(
            rx.recv().await.unwrap().target(),
            Some(&EventTarget::window("editor"))
        );
    }

    #[test]
    fn listeners_get_the_window_label() {
        let relay = relay(EmitPolicy::None);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        relay.listen("keyboard:ctrl+s", move |window| {
            sink.lock().unwrap().push(window.to_owned());
        });

        relay.handle(&keyboard_call("main", "s", true)).unwrap();
        relay.handle(&keyboard_call("main", "s", false)).unwrap();
        relay.handle(&keyboard_call("popup", "S", true)).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["main", "popup"]);
    }

    #[test]
    fn pointer_listeners() {
        let relay = relay(EmitPolicy::None);
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        relay.listen("pointer:contextmenu", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        relay.handle(&pointer_call("main", "contextmenu")).unwrap();
        relay.handle(&pointer_call("main", "dblclick")).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unlisten_removes_only_that_listener() {
        let relay = relay(EmitPolicy::None);
        let a = relay.listen("keyboard:f5", |_| {});
        let _b = relay.listen("keyboard:f5", |_| {});
        assert_eq!(relay.listener_count("keyboard:f5"), 2);

        assert!(relay.unlisten(&a));
        assert!(!relay.unlisten(&a));
        assert_eq!(relay.listener_count("keyboard:f5"), 1);
    }

    #[test]
    fn rejects_unknown_command_and_bad_payload() {
        let relay = relay(EmitPolicy::All);

        let call = InboundCall {
            window: "main".into(),
            invocation: Invocation::new("plugin:other|x", json!({})),
        };
        assert!(matches!(relay.handle(&call), Err(BridgeError::UnknownCommand(_))));

        let call = InboundCall {
            window: "main".into(),
            invocation: Invocation::new(KEYBOARD_COMMAND, json!({"key": 1})),
        };
        assert!(matches!(
            relay.handle(&call),
            Err(BridgeError::InvalidPayload { .. })
        ));
    }

    #[tokio::test]
    async fn spawned_relay_drains_channel() {
        let relay = Arc::new(relay(EmitPolicy::All));
        let mut rx = relay.bus().subscribe();
        let (sender, receiver) = mpsc::unbounded_channel();

        let task = Arc::clone(&relay).spawn(receiver);
        sender.send(keyboard_call("main", "s", true)).unwrap();
        sender.send(pointer_call("main", "contextmenu")).unwrap();
        drop(sender);
        task.await.unwrap();

        assert_eq!(rx.recv().await.unwrap().name(), Some(intercept_common::KEYBOARD_EVENT));
        assert_eq!(rx.recv().await.unwrap().name(), Some(intercept_common::POINTER_EVENT));
    }
}
