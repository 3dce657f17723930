//! Subcommand implementations.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use intercept_common::{BindingError, Event, InterceptError};
use intercept_config::{config_to_json, InterceptConfig};
use intercept_engine::{
    install, keybind_to_display, parse_keybind, Binding, Bridge, ChannelTransport, DomEvent,
    EventTarget, Installation,
};
use intercept_webview::{Builder, Script, IPC_INIT_SCRIPT};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// How long `simulate` waits for relayed events to reach the guest listener.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

pub fn script(config: &InterceptConfig, out: Option<&Path>, with_ipc: bool) -> Result<(), InterceptError> {
    let plugin = Builder::from_config(config).build()?;
    let script = if with_ipc {
        Script::from(IPC_INIT_SCRIPT).join(plugin.script())
    } else {
        plugin.script().clone()
    };

    match out {
        Some(path) => {
            std::fs::write(path, script.as_str())?;
            info!(path = %path.display(), bytes = script.as_str().len(), "script written");
        }
        None => println!("{script}"),
    }
    Ok(())
}

pub fn check(config: &InterceptConfig, json: bool) -> Result<(), InterceptError> {
    let plugin = Builder::from_config(config).build()?;
    let engine = plugin.engine();

    if json {
        println!("{}", config_to_json(config));
        return Ok(());
    }

    println!("origin:     {}", engine.origin.fragment().unwrap_or("(any)"));
    println!("emit:       {}", engine.emit);
    println!("track meta: {}", engine.tracks_meta());
    println!("policy:     {:?}", plugin.relay().policy());
    let bindings = engine.all_bindings();
    println!("bindings:   {}", bindings.len());

    for binding in &bindings {
        let label = match binding {
            Binding::Keyboard(kb) => keybind_to_display(kb),
            Binding::Pointer(pb) => pb.event().to_owned(),
        };
        println!("  {label:<20} {}", binding.shortcut_ids().join(", "));
    }
    Ok(())
}

/// Turn `Ctrl+S` or `pointer:contextmenu` into an event to dispatch.
pub fn parse_event(spec: &str) -> Result<DomEvent, BindingError> {
    if let Some(event) = spec.strip_prefix("pointer:") {
        if event.is_empty() {
            return Err(BindingError::EmptyEventName);
        }
        return Ok(DomEvent::new(event));
    }

    let kb = parse_keybind(spec)?;
    let key = kb
        .spec()
        .keys()
        .first()
        .map(|k| (*k).to_owned())
        .ok_or(BindingError::EmptyKey)?;
    Ok(DomEvent::keydown(key).with_modifiers(kb.modifiers()))
}

pub async fn simulate(
    mut config: InterceptConfig,
    origin: &str,
    window: &str,
    emit: bool,
    events: &[String],
) -> Result<(), InterceptError> {
    config.emit |= emit;
    let plugin = Builder::from_config(&config).build()?;

    let (transport, receiver) = ChannelTransport::channel(window);
    let relay_task = Arc::clone(plugin.relay()).spawn(receiver);

    let (lines, mut relayed) = mpsc::unbounded_channel();
    let guest = plugin.guest(window);
    {
        let lines = lines.clone();
        guest.on_keyboard_event(move |payload| {
            let _ = lines.send(format!("relayed keyboard {payload:?}"));
        });
    }
    guest.on_pointer_event(move |payload| {
        let _ = lines.send(format!("relayed pointer {payload:?}"));
    });

    // Listeners own the transport; dropping the target closes the channel.
    {
        let bridge = Bridge::new(Arc::new(transport));
        let mut target = EventTarget::new();
        let installation = install(plugin.engine(), origin, &mut target, &bridge)?;
        if installation == Installation::Inert {
            println!("origin {origin} does not match; nothing installed");
        }

        for spec in events {
            let event = parse_event(spec)?;
            let outcome = if target.dispatch(&event) {
                "passed"
            } else {
                "suppressed"
            };
            println!("{spec:<24} {outcome}");
        }
    }

    if let Err(e) = relay_task.await {
        warn!(error = %e, "relay task failed");
    }

    plugin.bus().publish(Event::Shutdown);
    let closed = tokio::time::timeout(DRAIN_TIMEOUT, async {
        while !guest.is_closed() {
            tokio::task::yield_now().await;
        }
    })
    .await;
    if closed.is_err() {
        debug!("guest listener still running, output may be incomplete");
    }
    drop(guest);

    while let Ok(line) = relayed.try_recv() {
        println!("{line}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use intercept_engine::ModifierKey;

    #[test]
    fn parses_keyboard_events() {
        let event = parse_event("Ctrl+Shift+I").unwrap();
        assert_eq!(event.event_type(), "keydown");
        assert_eq!(event.key(), Some("I"));
        assert_eq!(
            event.modifiers().keys(),
            vec![ModifierKey::CtrlKey, ModifierKey::ShiftKey]
        );

        let event = parse_event("esc").unwrap();
        assert_eq!(event.key(), Some("Escape"));
        assert!(event.modifiers().is_empty());
    }

    #[test]
    fn parses_pointer_events() {
        let event = parse_event("pointer:contextmenu").unwrap();
        assert_eq!(event.event_type(), "contextmenu");
        assert_eq!(event.key(), None);

        assert_eq!(parse_event("pointer:").unwrap_err(), BindingError::EmptyEventName);
    }

    #[test]
    fn rejects_bad_keybinds() {
        assert!(matches!(
            parse_event("Hyper+Q"),
            Err(BindingError::InvalidKeybind { .. })
        ));
    }

    #[tokio::test]
    async fn simulate_runs_end_to_end() {
        let config: InterceptConfig = intercept_config::toml_loader::load_from_str(
            r#"
emit = true
presets = ["print"]
"#,
        )
        .unwrap();

        simulate(
            config,
            "http://localhost",
            "main",
            false,
            &["Ctrl+P".to_owned(), "Ctrl+Q".to_owned()],
        )
        .await
        .unwrap();
    }
}
