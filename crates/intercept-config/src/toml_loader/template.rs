//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# Intercept Configuration
# Only override what you want to change -- missing fields use defaults.

# Activate only in documents whose origin contains this fragment.
# origin = "app.example.com"

# Forward suppressed events to the host.
emit = false

# Compare the meta key as well. Defaults to the opposite of `emit`.
# track_meta = true

# Where the host re-broadcasts forwarded events:
# "all", "origin", "focused", "none", or { custom = "<window label>" }.
# Defaults to "all" when emit is on, otherwise "none".
# emit_policy = "origin"

# Built-in browser shortcuts to block.
presets = [
  "find",
  "caret_browsing",
  "dev_tools",
  "downloads",
  "focus_move",
  "reload",
  "source",
  "open",
  "print",
  "context_menu",
]

# Custom key bindings. Set exactly one of `key`, `keys`, or `combo`.
# `key` matches case-insensitively, `keys` matches any listed key exactly.
#
# [[keyboard]]
# key = "F12"
#
# [[keyboard]]
# combo = "Ctrl+Shift+E"
#
# [[keyboard]]
# keys = ["a", "b"]
# alt = true

# Pointer or touch events blocked whenever they fire.
#
# [[pointer]]
# event = "dblclick"

[logging]
# level = "info"         # trace, debug, info, warn, error
"##
}
