//! JS initialization script generated from an engine configuration.
//!
//! The script is the in-page rendition of [`intercept_engine::install`]: the
//! same origin guard, bridge check, key predicates and modifier comparison,
//! expressed against the real `window`. Every string that ends up in it goes
//! through `serde_json`, so configured keys and origins cannot break out of
//! their literals.

use std::fmt;
use std::sync::Arc;

use intercept_common::{KEYBOARD_COMMAND, POINTER_COMMAND};
use intercept_engine::{Binding, EngineConfig, KeyBinding, KeySpec, PointerBinding};
use serde::Serialize;
use serde_json::Value;

use crate::ipc::INTERNALS_GLOBAL;

/// Script to be injected into a web view. Clones share the same buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script(Arc<str>);

impl Script {
    pub fn new(script: impl AsRef<str>) -> Self {
        Self(Arc::from(script.as_ref()))
    }

    /// A new script running `self` followed by `other`.
    #[must_use]
    pub fn join(&self, other: impl AsRef<str>) -> Self {
        let other = other.as_ref();
        let mut buf = String::with_capacity(self.0.len().saturating_add(other.len()).saturating_add(1));
        buf.push_str(&self.0);
        buf.push('\n');
        buf.push_str(other);
        Self::from(buf)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Script {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Script {
    fn from(value: &str) -> Self {
        Self(Arc::from(value))
    }
}

impl From<String> for Script {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl From<Script> for String {
    fn from(value: Script) -> Self {
        value.0.as_ref().to_owned()
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const TEMPLATE: &str = r#"(function () {
  var ORIGIN = /*ORIGIN*/;
  var EMIT = /*EMIT*/;
  var TRACK_META = /*TRACK_META*/;
  if (!window.location.origin.includes(ORIGIN ?? '')) {
    return;
  }
  var invoke = window./*INTERNALS*/?.invoke;
  if (EMIT && typeof invoke !== 'function') {
    throw new TypeError('bridge invoke function not found');
  }
  function onKey(key, options) {
    var isSet = Array.isArray(key);
    var lowered = isSet ? null : key.toLowerCase();
    window.addEventListener('keydown', function (e) {
      if (
        e.altKey !== options.altKey ||
        e.ctrlKey !== options.ctrlKey ||
        e.shiftKey !== options.shiftKey ||
        (TRACK_META && e.metaKey !== options.metaKey)
      ) {
        return;
      }
      if (isSet ? !key.includes(e.key) : e.key.toLowerCase() !== lowered) {
        return;
      }
      e.preventDefault();
      if (EMIT) {
        invoke(/*KEYBOARD_COMMAND*/, {
          key: isSet ? e.key : key,
          ctrlKey: options.ctrlKey,
          shiftKey: options.shiftKey,
          altKey: options.altKey
        });
      }
    });
  }
  function onPointer(name) {
    window.addEventListener(name, function (e) {
      e.preventDefault();
      if (EMIT) {
        invoke(/*POINTER_COMMAND*/, { event: name });
      }
    });
  }
/*BINDINGS*/})();
"#;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct KeyOptions {
    alt_key: bool,
    ctrl_key: bool,
    shift_key: bool,
    meta_key: bool,
}

/// Render the engine configuration as a self-contained init script.
pub fn generate_script(config: &EngineConfig) -> Script {
    let origin = config
        .origin
        .fragment()
        .map_or(Value::Null, Value::from)
        .to_string();

    let mut bindings = String::new();
    for binding in &config.all_bindings() {
        let line = match binding {
            Binding::Keyboard(kb) => on_key(kb),
            Binding::Pointer(pb) => on_pointer(pb),
        };
        bindings.push_str("  ");
        bindings.push_str(&line);
        bindings.push('\n');
    }

    let script = TEMPLATE
        .replace("/*ORIGIN*/", &origin)
        .replace("/*EMIT*/", bool_literal(config.emit))
        .replace("/*TRACK_META*/", bool_literal(config.tracks_meta()))
        .replace("/*INTERNALS*/", INTERNALS_GLOBAL)
        .replace("/*KEYBOARD_COMMAND*/", &Value::from(KEYBOARD_COMMAND).to_string())
        .replace("/*POINTER_COMMAND*/", &Value::from(POINTER_COMMAND).to_string())
        .replace("/*BINDINGS*/", &bindings);

    Script::from(script)
}

fn bool_literal(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn on_key(binding: &KeyBinding) -> String {
    let key = match binding.spec() {
        KeySpec::Single(key) => Value::from(key.as_str()),
        KeySpec::AnyOf(keys) => Value::from_iter(keys.iter().map(String::as_str)),
    };
    let modifiers = binding.modifiers();
    let options = KeyOptions {
        alt_key: modifiers.alt,
        ctrl_key: modifiers.ctrl,
        shift_key: modifiers.shift,
        meta_key: modifiers.meta,
    };
    let options = serde_json::to_string(&options).unwrap_or_else(|_| "{}".to_owned());
    format!("onKey({key}, {options});")
}

fn on_pointer(binding: &PointerBinding) -> String {
    format!("onPointer({});", Value::from(binding.event()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use intercept_config::Preset;

    #[test]
    fn single_key_binding() {
        let config = EngineConfig::new().binding(KeyBinding::with_ctrl("s"));
        let script = generate_script(&config);
        assert!(script
            .as_str()
            .contains(r#"onKey("s", {"altKey":false,"ctrlKey":true,"shiftKey":false,"metaKey":false});"#));
    }

    #[test]
    fn key_set_renders_as_array() {
        let config = EngineConfig::new().binding(KeyBinding::any_of(["b", "a"]));
        let script = generate_script(&config);
        assert!(script.as_str().contains(r#"onKey(["a","b"], "#));
    }

    #[test]
    fn pointer_binding() {
        let config = EngineConfig::new().binding(PointerBinding::context_menu());
        assert!(generate_script(&config)
            .as_str()
            .contains(r#"onPointer("contextmenu");"#));
    }

    #[test]
    fn flags_are_inlined() {
        let script = generate_script(&EngineConfig::new());
        assert!(script.as_str().contains("var ORIGIN = null;"));
        assert!(script.as_str().contains("var EMIT = false;"));
        assert!(script.as_str().contains("var TRACK_META = true;"));

        let script = generate_script(&EngineConfig::new().with_emit(true).with_origin("example.com"));
        assert!(script.as_str().contains(r#"var ORIGIN = "example.com";"#));
        assert!(script.as_str().contains("var EMIT = true;"));
        assert!(script.as_str().contains("var TRACK_META = false;"));
    }

    #[test]
    fn command_names_are_inlined() {
        let script = generate_script(&EngineConfig::new());
        assert!(script.as_str().contains(r#"invoke("plugin:intercept|keyboard", {"#));
        assert!(script.as_str().contains(r#"invoke("plugin:intercept|pointer", {"#));
        assert!(script.as_str().contains("window.__INTERCEPT_INTERNALS__?.invoke"));
        assert!(!script.as_str().contains("/*"));
    }

    #[test]
    fn strings_are_escaped() {
        let config = EngineConfig::new()
            .with_origin("x'); alert(1); ('")
            .binding(KeyBinding::new("\""))
            .binding(PointerBinding::new("</script>"));
        let script = generate_script(&config);
        assert!(script.as_str().contains(r#"var ORIGIN = "x'); alert(1); ('";"#));
        assert!(script.as_str().contains(r#"onKey("\"", "#));
    }

    #[test]
    fn one_call_per_binding() {
        let config = EngineConfig::new().with_presets(&Preset::ALL);
        let script = generate_script(&config);
        assert_eq!(script.as_str().matches("\n  onKey(").count(), 17);
        assert_eq!(script.as_str().matches("\n  onPointer(").count(), 1);
    }

    #[test]
    fn join_and_clone() {
        let a = Script::from("a();");
        let b = a.join("b();");
        assert_eq!(b.to_string(), "a();\nb();");
        assert_eq!(a.as_str(), "a();");

        let c = b.clone();
        assert!(std::ptr::eq(b.as_str(), c.as_str()));
        assert_eq!(String::from(c), "a();\nb();");
    }
}
