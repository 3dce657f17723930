//! Payloads carried across the bridge and re-broadcast by the relay.
//!
//! Field names are camelCase on the wire so the JS side can build them
//! straight from a `KeyboardEvent`.

use serde::{Deserialize, Serialize};

/// Identity used to namespace bridge commands and relay events.
pub const PLUGIN_NAME: &str = "intercept";

/// Bridge command carrying a [`KeyboardPayload`].
pub const KEYBOARD_COMMAND: &str = "plugin:intercept|keyboard";
/// Bridge command carrying a [`PointerPayload`].
pub const POINTER_COMMAND: &str = "plugin:intercept|pointer";

/// Relay event name for keyboard payloads.
pub const KEYBOARD_EVENT: &str = "intercept://keyboard";
/// Relay event name for pointer payloads.
pub const POINTER_EVENT: &str = "intercept://pointer";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyboardPayload {
    pub key: String,
    pub ctrl_key: bool,
    pub shift_key: bool,
    pub alt_key: bool,

    /// Label of the window the event came from. Filled in by the relay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerPayload {
    pub event: String,

    /// Label of the window the event came from. Filled in by the relay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

/// A single fire-and-forget call into the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invocation {
    #[serde(rename = "cmd")]
    pub command: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl Invocation {
    pub fn new(command: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            command: command.into(),
            payload,
        }
    }

    /// Parse an invocation from a raw JSON string (from JS `postMessage`).
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keyboard_payload_uses_camel_case() {
        let payload = KeyboardPayload {
            key: "s".into(),
            ctrl_key: true,
            shift_key: false,
            alt_key: false,
            origin: None,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({"key": "s", "ctrlKey": true, "shiftKey": false, "altKey": false})
        );
    }

    #[test]
    fn keyboard_payload_origin_is_optional_on_input() {
        let payload: KeyboardPayload = serde_json::from_value(
            json!({"key": "F5", "ctrlKey": false, "shiftKey": true, "altKey": false}),
        )
        .unwrap();
        assert_eq!(payload.key, "F5");
        assert!(payload.shift_key);
        assert!(payload.origin.is_none());
    }

    #[test]
    fn pointer_payload_with_origin() {
        let payload = PointerPayload {
            event: "contextmenu".into(),
            origin: Some("main".into()),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value, json!({"event": "contextmenu", "origin": "main"}));
    }

    #[test]
    fn invocation_from_post_message_body() {
        let raw = r#"{"cmd":"plugin:intercept|pointer","payload":{"event":"contextmenu"}}"#;
        let invocation = Invocation::from_json(raw).unwrap();
        assert_eq!(invocation.command, POINTER_COMMAND);
        assert_eq!(invocation.payload, json!({"event": "contextmenu"}));
    }

    #[test]
    fn invocation_rejects_garbage() {
        assert!(Invocation::from_json("not json").is_none());
        assert!(Invocation::from_json(r#"{"payload":{}}"#).is_none());
    }

    #[test]
    fn commands_are_namespaced_by_plugin() {
        assert!(KEYBOARD_COMMAND.contains(PLUGIN_NAME));
        assert!(POINTER_COMMAND.contains(PLUGIN_NAME));
        assert!(KEYBOARD_EVENT.starts_with(PLUGIN_NAME));
        assert!(POINTER_EVENT.starts_with(PLUGIN_NAME));
    }
}
