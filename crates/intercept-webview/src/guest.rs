//! Subscriptions to relayed events, as seen from one window.
//!
//! A [`GuestListener`] reads the process-wide [`EventBus`] on its own task
//! and hands every event addressed to its window to the callbacks registered
//! for that kind, in registration order. Delivery is asynchronous with
//! respect to the suppression that produced the event.

use std::sync::{Arc, Mutex, Weak};

use intercept_common::{Event, EventBus, KeyboardPayload, ListenerId, PointerPayload};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

type Callback<P> = Arc<dyn Fn(&P) + Send + Sync>;

struct Callbacks<P> {
    entries: Mutex<Vec<(ListenerId, Callback<P>)>>,
}

impl<P> Callbacks<P> {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            entries: Mutex::new(Vec::new()),
        })
    }

    fn add(&self, callback: Callback<P>) -> ListenerId {
        let id = ListenerId::new();
        if let Ok(mut entries) = self.entries.lock() {
            entries.push((id.clone(), callback));
        }
        id
    }

    fn remove(&self, id: &ListenerId) -> bool {
        let Ok(mut entries) = self.entries.lock() else {
            return false;
        };
        let before = entries.len();
        entries.retain(|(entry, _)| entry != id);
        entries.len() != before
    }

    fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// Snapshot, so callbacks may register or dispose while being called.
    fn dispatch(&self, payload: &P) {
        let callbacks: Vec<Callback<P>> = match self.entries.lock() {
            Ok(entries) => entries.iter().map(|(_, cb)| Arc::clone(cb)).collect(),
            Err(_) => return,
        };
        for callback in callbacks {
            callback(payload);
        }
    }
}

/// Handle returned by a subscription. Call [`Disposer::unlisten`] to stop
/// receiving events; dropping it keeps the subscription alive.
pub struct Disposer {
    id: ListenerId,
    remove: Box<dyn FnOnce(&ListenerId) -> bool + Send + Sync>,
}

impl Disposer {
    fn new<P: 'static>(id: ListenerId, callbacks: &Arc<Callbacks<P>>) -> Self {
        let callbacks: Weak<Callbacks<P>> = Arc::downgrade(callbacks);
        Self {
            id,
            remove: Box::new(move |id| callbacks.upgrade().is_some_and(|c| c.remove(id))),
        }
    }

    pub fn id(&self) -> &ListenerId {
        &self.id
    }

    /// Remove the subscription. Returns whether it was still registered.
    pub fn unlisten(self) -> bool {
        (self.remove)(&self.id)
    }
}

impl std::fmt::Debug for Disposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Disposer").field("id", &self.id).finish()
    }
}

pub struct GuestListener {
    window: String,
    keyboard: Arc<Callbacks<KeyboardPayload>>,
    pointer: Arc<Callbacks<PointerPayload>>,
    task: JoinHandle<()>,
}

impl GuestListener {
    /// Start listening on `bus` for events addressed to `window`.
    ///
    /// Must be called within a Tokio runtime.
    pub fn attach(bus: &EventBus, window: impl Into<String>) -> Self {
        let window = window.into();
        let keyboard = Callbacks::new();
        let pointer = Callbacks::new();

        let mut receiver = bus.subscribe();
        let task = {
            let window = window.clone();
            let keyboard = Arc::clone(&keyboard);
            let pointer = Arc::clone(&pointer);
            tokio::spawn(async move {
                loop {
                    let event = match receiver.recv().await {
                        Ok(event) => event,
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(window = %window, skipped, "guest listener lagged, events dropped");
                            continue;
                        }
                        Err(RecvError::Closed) => break,
                    };

                    match event {
                        Event::Keyboard { target, payload } if target.includes(&window) => {
                            keyboard.dispatch(&payload);
                        }
                        Event::Pointer { target, payload } if target.includes(&window) => {
                            pointer.dispatch(&payload);
                        }
                        Event::Shutdown => break,
                        _ => {}
                    }
                }
                debug!(window = %window, "guest listener stopped");
            })
        };

        Self {
            window,
            keyboard,
            pointer,
            task,
        }
    }

    pub fn window(&self) -> &str {
        &self.window
    }

    /// Call `callback` with every keyboard payload relayed to this window.
    pub fn on_keyboard_event<F>(&self, callback: F) -> Disposer
    where
        F: Fn(&KeyboardPayload) + Send + Sync + 'static,
    {
        let id = self.keyboard.add(Arc::new(callback));
        Disposer::new(id, &self.keyboard)
    }

    /// Alias for [`GuestListener::on_keyboard_event`].
    pub fn on<F>(&self, callback: F) -> Disposer
    where
        F: Fn(&KeyboardPayload) + Send + Sync + 'static,
    {
        self.on_keyboard_event(callback)
    }

    /// Call `callback` with every pointer payload relayed to this window.
    pub fn on_pointer_event<F>(&self, callback: F) -> Disposer
    where
        F: Fn(&PointerPayload) + Send + Sync + 'static,
    {
        let id = self.pointer.add(Arc::new(callback));
        Disposer::new(id, &self.pointer)
    }

    /// Whether the dispatch task has stopped, after a shutdown event or
    /// once the bus is gone.
    pub fn is_closed(&self) -> bool {
        self.task.is_finished()
    }

    pub fn keyboard_listeners(&self) -> usize {
        self.keyboard.len()
    }

    pub fn pointer_listeners(&self) -> usize {
        self.pointer.len()
    }
}

impl Drop for GuestListener {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl std::fmt::Debug for GuestListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuestListener")
            .field("window", &self.window)
            .field("keyboard", &self.keyboard.len())
            .field("pointer", &self.pointer.len())
            .finish()
    }
}
