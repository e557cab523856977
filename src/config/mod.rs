//! Configuration layer for Watchtower.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - The flag store with per-flag value sources ([`FlagStore`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - File-backed secret resolution ([`resolve_secrets`], [`is_file`])
//! - Alias processing ([`process_flag_aliases`])
//! - Docker environment export ([`env_config`])
//! - Resolved configuration ([`ResolvedConfig`]) and the startup sequence ([`startup`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments**
//! 2. **Environment variables** - each flag's `WATCHTOWER_*` or `DOCKER_*` binding
//! 3. **TOML config file** - only fills flags the first two left at their default
//! 4. **Built-in defaults**
//!
//! Any of the first three counts as "explicitly set" for the alias rules.
//!
//! # Secrets
//!
//! Secret-bearing flags (see [`secrets::SECRET_FLAGS`]) may hold a path to a
//! file instead of the value. Paths are replaced with file contents before
//! aliases are processed, so a `--notification-url` file can still receive
//! the porcelain `logger://` entry without duplication.
//!
//! # Aliases
//!
//! - `--interval N` becomes `--schedule "@every Ns"`. Supplying both is an error.
//! - `--porcelain v1` enables stdout notifications, the session report and the
//!   `porcelain.v1.summary-no-log` template, and adds `logger://`.
//! - `--debug` / `--trace` override `--log-level`.

mod aliases;
mod cli;
pub mod defaults;
mod docker_env;
mod duration;
mod error;
mod flags;
mod resolved;
pub mod secrets;
pub mod startup;
mod toml;

#[cfg(test)]
mod flags_tests;
#[cfg(test)]
mod secrets_tests;
#[cfg(test)]
mod test_support;

pub use aliases::{
    PorcelainVersion, apply_log_level_aliases, apply_porcelain, process_flag_aliases,
    reconcile_schedule,
};
pub use cli::{Cli, Command};
pub use docker_env::{DOCKER_ENV, env_config, var};
pub use duration::parse_duration;
pub use error::ConfigError;
pub use flags::{Flag, FlagKind, FlagSource, FlagStore, FlagValue, flag};
pub use resolved::{
    DockerSettings, HttpApiSettings, LogLevel, NotificationSettings, ResolvedConfig,
};
pub use secrets::{is_file, resolve_secret, resolve_secrets};
pub use startup::{FatalHandler, load_flag_store, resolve, resolve_or_halt};
pub use toml::{TomlConfig, default_config_template};

use std::path::Path;

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
