//! Plugin builder and `wry` wiring.

use std::sync::Arc;

use intercept_common::{EmitPolicy, EventBus, InterceptError};
use intercept_config::{InterceptConfig, Preset};
use intercept_engine::keymap::{keyboard_id, pointer_id};
use intercept_engine::{Binding, EngineConfig, InboundCall, KeySpec, ModifierKey};
use tracing::{debug, info, warn};
use wry::WebViewBuilder;

use crate::guest::GuestListener;
use crate::ipc::{parse_ipc_body, IPC_INIT_SCRIPT};
use crate::relay::{Relay, ShortcutListener};
use crate::script::{generate_script, Script};

/// Collects bindings, flags and host-side listeners into a [`Plugin`].
///
/// Starts with every [`Preset`] enabled; use [`Builder::debug`] to keep dev
/// tooling usable in debug builds, or [`Builder::empty`] to start from nothing.
pub struct Builder {
    engine: EngineConfig,
    policy: Option<EmitPolicy>,
    listeners: Vec<(String, ShortcutListener)>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    pub fn new() -> Self {
        Self::empty().presets(&Preset::ALL)
    }

    /// Like [`Builder::new`], but debug builds leave the context menu, dev
    /// tools and reload alone.
    pub fn debug() -> Self {
        Self::empty().presets(&Preset::debug())
    }

    pub fn empty() -> Self {
        Self {
            engine: EngineConfig::new(),
            policy: None,
            listeners: Vec::new(),
        }
    }

    /// Start from a loaded config file.
    pub fn from_config(config: &InterceptConfig) -> Self {
        Self {
            engine: EngineConfig::from_config(config),
            policy: Some(config.emit_policy()),
            listeners: Vec::new(),
        }
    }

    /// Replace the enabled presets.
    #[must_use]
    pub fn presets(mut self, presets: &[Preset]) -> Self {
        self.engine = self.engine.with_presets(presets);
        self
    }

    #[must_use]
    pub fn shortcut(mut self, binding: impl Into<Binding>) -> Self {
        self.engine = self.engine.binding(binding);
        self
    }

    /// Add a binding and run `listener` on the host whenever it fires.
    ///
    /// Forwarded payloads carry no meta flag, so the listener is keyed as if
    /// meta were not part of the binding.
    #[must_use]
    pub fn listen<F>(mut self, binding: impl Into<Binding>, listener: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let binding = binding.into();
        let listener: ShortcutListener = Arc::new(listener);
        for id in relay_ids(&binding) {
            self.listeners.push((id, Arc::clone(&listener)));
        }
        self.engine = self.engine.binding(binding);
        self
    }

    /// Only install in documents whose origin contains `fragment`.
    #[must_use]
    pub fn origin(mut self, fragment: impl Into<String>) -> Self {
        self.engine = self.engine.with_origin(fragment);
        self
    }

    /// Forward suppressed events to the host.
    #[must_use]
    pub fn emit(mut self, emit: bool) -> Self {
        self.engine = self.engine.with_emit(emit);
        self
    }

    #[must_use]
    pub fn track_meta(mut self, track_meta: bool) -> Self {
        self.engine = self.engine.with_track_meta(track_meta);
        self
    }

    #[must_use]
    pub fn emit_policy(mut self, policy: EmitPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Validate every binding and produce the plugin.
    pub fn build(self) -> Result<Plugin, InterceptError> {
        let bindings = self.engine.all_bindings();
        for binding in &bindings {
            binding.validate()?;
        }

        let policy = self.policy.unwrap_or(if self.engine.emit {
            EmitPolicy::All
        } else {
            EmitPolicy::None
        });
        let bus = Arc::new(EventBus::default());
        let relay = Arc::new(Relay::new(Arc::clone(&bus), policy));
        for (shortcut, listener) in self.listeners {
            relay.listen_shared(shortcut, listener);
        }

        let script = generate_script(&self.engine);
        info!(
            bindings = bindings.len(),
            emit = self.engine.emit,
            policy = ?relay.policy(),
            "intercept plugin built"
        );

        Ok(Plugin {
            engine: self.engine,
            script,
            relay,
            bus,
        })
    }
}

fn relay_ids(binding: &Binding) -> Vec<String> {
    match binding {
        Binding::Keyboard(kb) => {
            let mut modifiers = kb.modifiers().keys();
            if modifiers.contains(&ModifierKey::MetaKey) {
                warn!("meta is not forwarded; listener keyed without it");
                modifiers.retain(|m| *m != ModifierKey::MetaKey);
            }
            match kb.spec() {
                KeySpec::Single(key) => vec![keyboard_id(key, &modifiers)],
                KeySpec::AnyOf(keys) => keys.iter().map(|k| keyboard_id(k, &modifiers)).collect(),
            }
        }
        Binding::Pointer(pb) => vec![pointer_id(pb.event())],
    }
}

/// A built plugin: the init script plus the host relay behind it.
#[derive(Debug, Clone)]
pub struct Plugin {
    engine: EngineConfig,
    script: Script,
    relay: Arc<Relay>,
    bus: Arc<EventBus>,
}

impl Plugin {
    pub fn builder() -> Builder {
        Builder::new()
    }

    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }

    /// The interception script, for manual injection.
    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn relay(&self) -> &Arc<Relay> {
        &self.relay
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    /// Subscribe to events relayed to `window`.
    pub fn guest(&self, window: impl Into<String>) -> GuestListener {
        GuestListener::attach(&self.bus, window)
    }

    /// Feed a raw IPC body posted by the web view labelled `window`.
    pub fn handle_ipc(&self, window: &str, body: &str) {
        handle_ipc(&self.relay, window, body);
    }

    /// Add the init scripts and an IPC handler that feeds the relay.
    pub fn attach<'a>(&self, builder: WebViewBuilder<'a>, window: impl Into<String>) -> WebViewBuilder<'a> {
        let window = window.into();
        let relay = Arc::clone(&self.relay);
        debug!(window = %window, "attaching intercept plugin");

        builder
            .with_initialization_script(IPC_INIT_SCRIPT)
            .with_initialization_script(self.script.as_str())
            .with_ipc_handler(move |request| {
                handle_ipc(&relay, &window, request.body());
            })
    }
}

fn handle_ipc(relay: &Relay, window: &str, body: &str) {
    let Some(invocation) = parse_ipc_body(body) else {
        return;
    };
    let call = InboundCall {
        window: window.to_owned(),
        invocation,
    };
    if let Err(e) = relay.handle(&call) {
        warn!(window = %window, error = %e, "IPC message rejected");
    }
}
