//! Bindings behind each [`Preset`].

use intercept_config::Preset;

use crate::binding::{Binding, KeyBinding, PointerBinding};

/// The bindings a preset stands for.
pub fn preset_bindings(preset: Preset) -> Vec<Binding> {
    let key = |k: &str| Binding::from(KeyBinding::new(k));
    let ctrl = |k: &str| Binding::from(KeyBinding::with_ctrl(k));
    let ctrl_shift = |k: &str| Binding::from(KeyBinding::with_ctrl_shift(k));
    let shift = |k: &str| Binding::from(KeyBinding::with_shift(k));

    match preset {
        Preset::Find => vec![key("F3"), ctrl("f"), ctrl("g"), ctrl_shift("g")],
        Preset::CaretBrowsing => vec![key("F7")],
        Preset::DevTools => vec![ctrl_shift("i")],
        Preset::Downloads => vec![ctrl("j")],
        Preset::FocusMove => vec![shift("Tab")],
        Preset::Reload => vec![key("F5"), ctrl("F5"), shift("F5"), ctrl("r"), ctrl_shift("r")],
        Preset::Source => vec![ctrl("u")],
        Preset::Open => vec![ctrl("o")],
        Preset::Print => vec![ctrl("p"), ctrl_shift("p")],
        Preset::ContextMenu => vec![PointerBinding::context_menu().into()],
    }
}
