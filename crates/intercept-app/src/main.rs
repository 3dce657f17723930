mod cli;
mod commands;

use std::process::ExitCode;

use intercept_config::InterceptConfig;
use tracing_subscriber::EnvFilter;

use crate::cli::Command;

const DEFAULT_DIRECTIVE: &str = "intercept=info";

/// Turn a bare level into a crate-scoped directive; pass anything else through.
fn log_directive(level: &str) -> String {
    if intercept_config::schema::LOG_LEVELS.contains(&level) {
        format!("intercept={level}")
    } else {
        level.to_owned()
    }
}

fn init_logging(directive: &str) {
    let mut filter = EnvFilter::from_default_env();
    match directive.parse() {
        Ok(d) => filter = filter.add_directive(d),
        Err(e) => {
            eprintln!("invalid log directive '{directive}': {e}, using {DEFAULT_DIRECTIVE}");
            if let Ok(d) = DEFAULT_DIRECTIVE.parse() {
                filter = filter.add_directive(d);
            }
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&std::path::Path>) -> Result<InterceptConfig, intercept_common::ConfigError> {
    match path {
        Some(path) => intercept_config::toml_loader::load_from_path(path),
        None => intercept_config::load_config(),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    // Logging is configured from the file, so it comes up after loading it.
    let config = load_config(args.config.as_deref());

    let directive = match (&args.log_level, &config) {
        (Some(level), _) => log_directive(level),
        (None, Ok(config)) => log_directive(&config.logging.level),
        (None, Err(_)) => DEFAULT_DIRECTIVE.to_owned(),
    };
    init_logging(&directive);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        presets = config.presets.len(),
        keyboard = config.keyboard.len(),
        pointer = config.pointer.len(),
        "config loaded"
    );

    let result = match args.command {
        Command::Script { out, with_ipc } => commands::script(&config, out.as_deref(), with_ipc),
        Command::Check { json } => commands::check(&config, json),
        Command::Simulate {
            origin,
            window,
            emit,
            events,
        } => commands::simulate(config, &origin, &window, emit, &events).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_levels_are_scoped() {
        assert_eq!(log_directive("debug"), "intercept=debug");
        assert_eq!(log_directive("intercept_engine=trace"), "intercept_engine=trace");
    }
}
