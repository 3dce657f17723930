use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// intercept: block browser shortcuts in a web view and relay them to the host.
#[derive(Parser, Debug)]
#[command(name = "intercept", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error) or a full filter directive.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the init script generated from the config.
    Script {
        /// Write to a file instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Prepend the IPC bridge script.
        #[arg(long)]
        with_ipc: bool,
    },

    /// Validate the config and list every binding.
    Check {
        /// Print the resolved config as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Dispatch events through the engine and report what it does.
    ///
    /// Events are keybind strings (`Ctrl+S`, `F5`) or `pointer:<event>`.
    Simulate {
        /// Origin of the simulated document.
        #[arg(long, default_value = "http://localhost")]
        origin: String,

        /// Label of the simulated window.
        #[arg(long, default_value = "main")]
        window: String,

        /// Force forwarding on, whatever the config says.
        #[arg(long)]
        emit: bool,

        #[arg(required = true)]
        events: Vec<String>,
    },
}

pub fn parse() -> Args {
    Args::parse()
}
