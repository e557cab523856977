//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, the process-terminating
//! fatal handler, and error hints that support the main entry point.

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::Formatter;
use tracing_subscriber::reload;
use watchtower::config::{ConfigError, FatalHandler, LogLevel};

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - invalid args, conflicting flags, unreadable secrets.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Raw status for [`CONFIG_ERROR`], for `std::process::exit`.
    pub const CONFIG_ERROR_STATUS: i32 = 1;
}

/// Terminates the process on a fatal configuration error.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExitProcess;

impl FatalHandler for ExitProcess {
    fn fatal(&self, error: &ConfigError) {
        tracing::error!("Configuration error: {error}");
        print_config_hint(error);
        std::process::exit(exit_code::CONFIG_ERROR_STATUS);
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::FileRead { .. } => {
            eprintln!("\nRun 'watchtower init' to generate a configuration template.");
        }
        ConfigError::ScheduleConflict { .. } => {
            eprintln!(
                "\nRemove either --schedule (WATCHTOWER_SCHEDULE) or --interval (WATCHTOWER_POLL_INTERVAL)."
            );
        }
        ConfigError::SecretRead { .. } => {
            eprintln!("\nCheck that the secret file exists and is readable by this process.");
        }
        _ if error.is_conflict() => {
            eprintln!("\nRun 'watchtower --help' to see the supported flag values.");
        }
        _ => {}
    }
}

/// Handle for raising or lowering the log level after startup.
pub struct TracingHandle(reload::Handle<EnvFilter, Formatter>);

impl TracingHandle {
    /// Replaces the default level; `RUST_LOG` directives still take precedence.
    pub fn set_level(&self, level: LogLevel) {
        if let Err(e) = self.0.reload(filter_for(level.into())) {
            tracing::warn!("Failed to apply log level {level}: {e}");
        }
    }
}

/// Sets up the tracing subscriber for logging at `info` until the
/// configured level is known.
pub fn setup_tracing() -> TracingHandle {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter_for(Level::INFO))
        .with_target(false)
        .with_filter_reloading();
    let handle = builder.reload_handle();
    builder.init();

    TracingHandle(handle)
}

fn filter_for(level: Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}
