//! Engine installation: origin guard, transport resolution, listeners.

use std::sync::Arc;

use intercept_common::{
    BridgeError, InterceptError, Invocation, KEYBOARD_COMMAND, POINTER_COMMAND,
};
use intercept_config::{InterceptConfig, KeyboardEntry, Preset};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::binding::{Binding, KeyBinding, KeyBindingBuilder, KeySpec, ModifierKey, ModifierMatcher, PointerBinding};
use crate::dom::{EventSource, Listener, KEYDOWN};
use crate::keymap::parse_keybind;
use crate::origin::OriginFilter;
use crate::preset::preset_bindings;
use crate::transport::{Bridge, Transport};

/// Everything baked into the engine at load time.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub origin: OriginFilter,
    pub emit: bool,
    /// Compare the meta key as well. `None` means "only when not emitting".
    pub track_meta: Option<bool>,
    /// Preset groups, each listed once.
    pub presets: Vec<Preset>,
    /// Bindings added on top of the presets.
    pub bindings: Vec<Binding>,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_origin(mut self, fragment: impl Into<String>) -> Self {
        self.origin = OriginFilter::new(Some(fragment));
        self
    }

    #[must_use]
    pub fn with_emit(mut self, emit: bool) -> Self {
        self.emit = emit;
        self
    }

    #[must_use]
    pub fn with_track_meta(mut self, track_meta: bool) -> Self {
        self.track_meta = Some(track_meta);
        self
    }

    /// Replace the enabled presets. Repeats are dropped.
    #[must_use]
    pub fn with_presets(mut self, presets: &[Preset]) -> Self {
        self.presets.clear();
        for preset in presets {
            if !self.presets.contains(preset) {
                self.presets.push(*preset);
            }
        }
        self
    }

    #[must_use]
    pub fn binding(mut self, binding: impl Into<Binding>) -> Self {
        self.bindings.push(binding.into());
        self
    }

    pub fn tracks_meta(&self) -> bool {
        self.track_meta.unwrap_or(!self.emit)
    }

    /// Preset bindings followed by the added ones, each binding once.
    pub fn all_bindings(&self) -> Vec<Binding> {
        let mut all: Vec<Binding> = Vec::new();
        let expanded = self.presets.iter().flat_map(|p| preset_bindings(*p));
        for binding in expanded.chain(self.bindings.iter().cloned()) {
            if all.contains(&binding) {
                debug!(ids = ?binding.shortcut_ids(), "duplicate binding dropped");
                continue;
            }
            all.push(binding);
        }
        all
    }

    /// Build from a loaded config file.
    ///
    /// Combos that fail to parse are logged as warnings and skipped.
    pub fn from_config(config: &InterceptConfig) -> Self {
        let mut engine = Self {
            origin: OriginFilter::new(config.origin_fragment()),
            emit: config.emit,
            track_meta: Some(config.tracks_meta()),
            presets: Vec::new(),
            bindings: Vec::new(),
        }
        .with_presets(&config.presets);

        for entry in &config.keyboard {
            match keyboard_entry_binding(entry) {
                Ok(Some(kb)) => engine.bindings.push(kb.into()),
                Ok(None) => warn!(?entry, "keyboard entry names no key, skipped"),
                Err(e) => warn!("{e}"),
            }
        }

        for entry in &config.pointer {
            engine.bindings.push(PointerBinding::new(&entry.event).into());
        }

        engine
    }
}

/// Turn a `[[keyboard]]` entry into a binding.
pub fn keyboard_entry_binding(
    entry: &KeyboardEntry,
) -> Result<Option<KeyBinding>, intercept_common::BindingError> {
    let builder = if let Some(combo) = &entry.combo {
        let parsed = parse_keybind(combo)?;
        KeyBindingBuilder::from_spec(parsed.spec().clone()).modifiers(&parsed.modifiers().keys())
    } else if let Some(key) = &entry.key {
        KeyBinding::builder(key)
    } else if let Some(keys) = &entry.keys {
        KeyBindingBuilder::from_spec(KeySpec::any_of(keys.iter().cloned()))
    } else {
        return Ok(None);
    };

    let flags = [
        (entry.alt, ModifierKey::AltKey),
        (entry.ctrl, ModifierKey::CtrlKey),
        (entry.shift, ModifierKey::ShiftKey),
        (entry.meta, ModifierKey::MetaKey),
    ];
    let builder = flags
        .into_iter()
        .filter(|(set, _)| *set)
        .fold(builder, |b, (_, m)| b.modifier(m));

    Ok(Some(builder.build()))
}

/// Outcome of [`install`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Installation {
    /// The origin did not match; nothing was registered.
    Inert,
    Active { keyboard: usize, pointer: usize },
}

impl Installation {
    pub fn is_active(&self) -> bool {
        matches!(self, Installation::Active { .. })
    }

    /// Number of listeners registered on the event source.
    pub fn listeners(&self) -> usize {
        match self {
            Installation::Inert => 0,
            Installation::Active { keyboard, pointer } => keyboard + pointer,
        }
    }
}

/// Install the engine on `source` for a document with the given origin.
///
/// Checks run in order, before any listener is registered:
/// 1. origin guard: a mismatch returns [`Installation::Inert`];
/// 2. transport: forwarding without an invoke capability is an error;
/// 3. every binding must be well formed.
///
/// Then one listener per binding is registered. Bindings are fixed from here
/// on; there is no way to remove them.
pub fn install<S: EventSource + ?Sized>(
    config: &EngineConfig,
    origin: &str,
    source: &mut S,
    bridge: &Bridge,
) -> Result<Installation, InterceptError> {
    if !config.origin.allows(origin) {
        debug!(origin, fragment = ?config.origin.fragment(), "origin mismatch, engine inert");
        return Ok(Installation::Inert);
    }

    let transport = bridge.resolve(config.emit)?;

    let bindings = config.all_bindings();
    for binding in &bindings {
        binding.validate()?;
    }

    let track_meta = config.tracks_meta();
    let mut keyboard = 0;
    let mut pointer = 0;

    for binding in &bindings {
        match binding {
            Binding::Keyboard(kb) => {
                if !track_meta && kb.modifiers().meta {
                    warn!(ids = ?kb.shortcut_ids(), "meta is not tracked; binding matches without it");
                }
                source.add_event_listener(KEYDOWN, keydown_listener(kb, track_meta, transport.clone()));
                keyboard += 1;
            }
            Binding::Pointer(pb) => {
                source.add_event_listener(pb.event(), pointer_listener(pb, transport.clone()));
                pointer += 1;
            }
        }
    }

    info!(origin, keyboard, pointer, emit = config.emit, "interception engine installed");
    Ok(Installation::Active { keyboard, pointer })
}

fn keydown_listener(
    binding: &KeyBinding,
    track_meta: bool,
    transport: Option<Arc<dyn Transport>>,
) -> Listener {
    let matcher = ModifierMatcher::new(binding.modifiers(), track_meta);
    let predicate = binding.spec().predicate();
    let binding = binding.clone();

    Box::new(move |event| {
        if !matcher.matches(event.modifiers()) {
            return;
        }
        let Some(key) = event.key() else {
            return;
        };
        if !predicate.test(key) {
            return;
        }

        event.prevent_default();
        debug!(key, "keydown suppressed");

        if let Some(transport) = &transport {
            forward(transport.as_ref(), KEYBOARD_COMMAND, &binding.payload(key));
        }
    })
}

fn pointer_listener(binding: &PointerBinding, transport: Option<Arc<dyn Transport>>) -> Listener {
    let binding = binding.clone();

    Box::new(move |event| {
        event.prevent_default();
        debug!(event = %event.event_type(), "pointer event suppressed");

        if let Some(transport) = &transport {
            forward(transport.as_ref(), POINTER_COMMAND, &binding.payload());
        }
    })
}

/// Serialize and hand off. Never waits on the host.
fn forward<P: Serialize>(transport: &dyn Transport, command: &str, payload: &P) {
    match invocation(command, payload) {
        Ok(invocation) => transport.invoke(invocation),
        Err(e) => warn!(command, error = %e, "payload not forwarded"),
    }
}

fn invocation<P: Serialize>(command: &str, payload: &P) -> Result<Invocation, BridgeError> {
    let value = serde_json::to_value(payload)?;
    Ok(Invocation::new(command, value))
}
