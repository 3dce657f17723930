//! Configuration schema types.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod bindings;
mod logging;
mod preset;

pub use bindings::*;
pub use logging::*;
pub use preset::*;

use intercept_common::EmitPolicy;
use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InterceptConfig {
    /// Only activate in documents whose origin contains this fragment.
    pub origin: Option<String>,
    /// Forward suppressed events to the host.
    pub emit: bool,
    /// Compare the meta key too. Defaults to `!emit`.
    pub track_meta: Option<bool>,
    /// Re-broadcast policy. Defaults to `all` when `emit` is on, else `none`.
    pub emit_policy: Option<EmitPolicy>,
    /// Built-in browser shortcut groups to block.
    pub presets: Vec<Preset>,
    pub keyboard: Vec<KeyboardEntry>,
    pub pointer: Vec<PointerEntry>,
    pub logging: LoggingConfig,
}

impl Default for InterceptConfig {
    fn default() -> Self {
        Self {
            origin: None,
            emit: false,
            track_meta: None,
            emit_policy: None,
            presets: Preset::ALL.to_vec(),
            keyboard: Vec::new(),
            pointer: Vec::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl InterceptConfig {
    /// Whether the meta key takes part in modifier matching.
    pub fn tracks_meta(&self) -> bool {
        self.track_meta.unwrap_or(!self.emit)
    }

    /// The effective re-broadcast policy.
    pub fn emit_policy(&self) -> EmitPolicy {
        match &self.emit_policy {
            Some(policy) => policy.clone(),
            None if self.emit => EmitPolicy::All,
            None => EmitPolicy::None,
        }
    }

    /// The origin fragment, with a blank fragment treated as absent.
    pub fn origin_fragment(&self) -> Option<&str> {
        self.origin.as_deref().filter(|o| !o.trim().is_empty())
    }
}
