//! WebView side of input interception.
//!
//! Turns an [`EngineConfig`](intercept_engine::EngineConfig) into something a
//! `wry` web view can run, and carries what it forwards back to the host:
//! - [`script`]: the injected rendition of the engine
//! - [`ipc`]: the `postMessage` bridge the script invokes through
//! - [`relay`]: host relay, shortcut listeners and emit policy
//! - [`guest`]: subscription API over relayed events
//! - [`plugin`]: builder tying it together and wiring a `WebViewBuilder`

pub mod guest;
pub mod ipc;
pub mod plugin;
pub mod relay;
pub mod script;

pub use guest::{Disposer, GuestListener};
pub use ipc::{parse_ipc_body, IPC_INIT_SCRIPT};
pub use plugin::{Builder, Plugin};
pub use relay::{Relay, ShortcutListener};
pub use script::{generate_script, Script};
