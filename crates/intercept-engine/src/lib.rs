//! Input interception engine.
//!
//! Decides, for every raw input event a web view dispatches, whether it
//! matches a registered binding. Matched events have their default action
//! suppressed and, when forwarding is enabled, a payload describing them is
//! handed to the bridge transport.
//!
//! - [`binding`]: key and pointer bindings, key predicates, modifier matching
//! - [`dom`]: event snapshots and the [`EventSource`] abstraction
//! - [`transport`]: fire-and-forget forwarding into the host
//! - [`engine`]: origin guard and listener installation

pub mod binding;
pub mod dom;
pub mod engine;
pub mod keymap;
pub mod origin;
pub mod preset;
pub mod transport;

pub use binding::{Binding, KeyBinding, KeyBindingBuilder, KeySpec, ModifierKey, Modifiers, PointerBinding};
pub use dom::{DomEvent, EventSource, EventTarget, Listener};
pub use engine::{install, EngineConfig, Installation};
pub use keymap::{keybind_to_display, parse_keybind};
pub use origin::OriginFilter;
pub use preset::preset_bindings;
pub use transport::{Bridge, ChannelTransport, InboundCall, RecordingTransport, Transport};
