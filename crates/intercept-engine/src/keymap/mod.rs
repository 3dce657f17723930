//! Human-readable keybind strings and canonical shortcut ids.

pub(crate) mod display;
mod parse;

pub use display::{keybind_to_display, keyboard as keyboard_id, pointer as pointer_id};
pub use parse::parse_keybind;
