//! Named groups of built-in browser shortcuts.

use serde::{Deserialize, Serialize};

/// A group of default browser behaviors that can be blocked together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// `F3`, `Ctrl+F`, `Ctrl+G`, `Ctrl+Shift+G`
    Find,
    /// `F7`
    CaretBrowsing,
    /// `Ctrl+Shift+I`
    DevTools,
    /// `Ctrl+J`
    Downloads,
    /// `Shift+Tab`
    FocusMove,
    /// `F5`, `Ctrl+F5`, `Shift+F5`, `Ctrl+R`, `Ctrl+Shift+R`
    Reload,
    /// `Ctrl+U`
    Source,
    /// `Ctrl+O`
    Open,
    /// `Ctrl+P`, `Ctrl+Shift+P`
    Print,
    /// Right click
    ContextMenu,
}

impl Preset {
    pub const ALL: [Preset; 10] = [
        Preset::Find,
        Preset::CaretBrowsing,
        Preset::DevTools,
        Preset::Downloads,
        Preset::FocusMove,
        Preset::Reload,
        Preset::Source,
        Preset::Open,
        Preset::Print,
        Preset::ContextMenu,
    ];

    pub fn is_pointer(self) -> bool {
        matches!(self, Preset::ContextMenu)
    }

    /// All keyboard presets.
    pub fn keyboard() -> Vec<Preset> {
        Self::ALL.into_iter().filter(|p| !p.is_pointer()).collect()
    }

    /// All pointer presets.
    pub fn pointer() -> Vec<Preset> {
        Self::ALL.into_iter().filter(|p| p.is_pointer()).collect()
    }

    /// Everything, except that debug builds keep the context menu, dev tools
    /// and reload available.
    pub fn debug() -> Vec<Preset> {
        if cfg!(debug_assertions) {
            Self::ALL
                .into_iter()
                .filter(|p| !matches!(p, Preset::ContextMenu | Preset::DevTools | Preset::Reload))
                .collect()
        } else {
            Self::ALL.to_vec()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyboard_and_pointer_partition_all() {
        let keyboard = Preset::keyboard();
        let pointer = Preset::pointer();
        assert_eq!(keyboard.len() + pointer.len(), Preset::ALL.len());
        assert_eq!(pointer, vec![Preset::ContextMenu]);
        assert!(!keyboard.contains(&Preset::ContextMenu));
    }

    #[test]
    fn debug_presets() {
        let debug = Preset::debug();
        if cfg!(debug_assertions) {
            assert_eq!(debug.len(), Preset::ALL.len() - 3);
            assert!(!debug.contains(&Preset::DevTools));
            assert!(debug.contains(&Preset::Print));
        } else {
            assert_eq!(debug, Preset::ALL.to_vec());
        }
    }

    #[test]
    fn preset_names_are_snake_case() {
        let json = serde_json::to_string(&Preset::CaretBrowsing).unwrap();
        assert_eq!(json, r#""caret_browsing""#);
    }
}
