//! Watchtower: automatic container updates
//!
//! Entry point: resolves the configuration and hands it to the daemon.

use std::process::ExitCode;

use watchtower::config::{
    Cli, Command, FatalHandler, load_flag_store, resolve_or_halt, write_default_config,
};
use watchtower::env::ProcessEnvironment;

mod app;

use app::{ExitProcess, exit_code, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let tracing = setup_tracing();
    let (cli, matches) = Cli::parse_args();

    // Handle init subcommand
    if let Some(Command::Init { output }) = &cli.command {
        return handle_init(output);
    }

    let store = match load_flag_store(&cli, &matches) {
        Ok(store) => store,
        Err(e) => {
            ExitProcess.fatal(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    let Some(config) = resolve_or_halt(store, &mut ProcessEnvironment, &ExitProcess) else {
        return exit_code::CONFIG_ERROR;
    };

    tracing.set_level(config.log_level);
    tracing::info!("{config}");

    exit_code::SUCCESS
}

/// Handles the `init` subcommand.
fn handle_init(output: &std::path::Path) -> ExitCode {
    match write_default_config(output) {
        Ok(()) => {
            println!("Configuration template written to: {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}
