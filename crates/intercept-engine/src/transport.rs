//! Bridge transport: fire-and-forget calls into the host.

use std::sync::{Arc, Mutex};

use intercept_common::{BridgeError, Invocation};
use tokio::sync::mpsc;
use tracing::debug;

/// A one-way call into the host.
///
/// `invoke` hands the call off and returns immediately. Callers never wait
/// for or observe the outcome; calls are independent and may arrive in any
/// order.
pub trait Transport: Send + Sync {
    fn invoke(&self, invocation: Invocation);
}

/// The host-provided bridge object, as seen from inside the web view.
#[derive(Clone, Default)]
pub struct Bridge {
    invoke: Option<Arc<dyn Transport>>,
}

impl Bridge {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            invoke: Some(transport),
        }
    }

    /// A bridge with no invoke capability.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_invoke(&self) -> bool {
        self.invoke.is_some()
    }

    /// Resolve the transport the engine forwards through.
    ///
    /// Returns `Ok(None)` when forwarding is off. With forwarding on, a
    /// missing capability is a configuration error.
    pub fn resolve(&self, emit: bool) -> Result<Option<Arc<dyn Transport>>, BridgeError> {
        if !emit {
            return Ok(None);
        }
        self.invoke
            .clone()
            .map(Some)
            .ok_or(BridgeError::TransportMissing)
    }
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("invoke", &self.invoke.is_some())
            .finish()
    }
}

/// An invocation tagged with the window it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundCall {
    pub window: String,
    pub invocation: Invocation,
}

/// Transport that queues calls on an unbounded channel read by the host.
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    window: String,
    sender: mpsc::UnboundedSender<InboundCall>,
}

impl ChannelTransport {
    pub fn new(window: impl Into<String>, sender: mpsc::UnboundedSender<InboundCall>) -> Self {
        Self {
            window: window.into(),
            sender,
        }
    }

    /// Create a transport for `window` plus the receiving end for the host.
    pub fn channel(window: impl Into<String>) -> (Self, mpsc::UnboundedReceiver<InboundCall>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(window, sender), receiver)
    }
}

impl Transport for ChannelTransport {
    fn invoke(&self, invocation: Invocation) {
        let call = InboundCall {
            window: self.window.clone(),
            invocation,
        };
        if let Err(e) = self.sender.send(call) {
            debug!(window = %self.window, command = %e.0.invocation.command, "host gone, call dropped");
        }
    }
}

/// Transport that records every call. Useful for dry runs and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    calls: Arc<Mutex<Vec<Invocation>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded so far.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Transport for RecordingTransport {
    fn invoke(&self, invocation: Invocation) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(invocation);
        }
    }
}
