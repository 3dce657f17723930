//! IPC between the injected script and the host.
//!
//! Only one direction is needed: the script calls
//! `window.__INTERCEPT_INTERNALS__.invoke(cmd, payload)`, which posts
//! `{"cmd": ..., "payload": ...}` through `window.ipc.postMessage` and lands
//! in the `ipc_handler` registered on the WebView.

use intercept_common::Invocation;
use tracing::warn;

/// Name of the global the interception script resolves `invoke` from.
pub const INTERNALS_GLOBAL: &str = "__INTERCEPT_INTERNALS__";

/// JavaScript snippet that exposes the invoke capability to the page.
///
/// Must run before the interception script, which throws at load time when
/// forwarding is enabled and `invoke` is missing.
pub const IPC_INIT_SCRIPT: &str = r#"
(function() {
    window.__INTERCEPT_INTERNALS__ = window.__INTERCEPT_INTERNALS__ || {};
    window.__INTERCEPT_INTERNALS__.invoke = function(cmd, payload) {
        window.ipc.postMessage(JSON.stringify({
            cmd: cmd,
            payload: payload === undefined ? null : payload
        }));
    };
})();
"#;

/// Parse a raw IPC body into an invocation.
///
/// Bodies that are not JSON or lack a `cmd` are logged and dropped.
pub fn parse_ipc_body(body: &str) -> Option<Invocation> {
    let invocation = Invocation::from_json(body);
    if invocation.is_none() {
        warn!(body_len = body.len(), "IPC message rejected: not an invocation");
    }
    invocation
}
