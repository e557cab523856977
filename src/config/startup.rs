//! The startup resolution sequence.
//!
//! ```text
//! FlagStore ─► resolve_secrets ─► process_flag_aliases ─► ResolvedConfig ─► env_config
//! ```
//!
//! Any failure stops the sequence; nothing after the failing step runs.

use std::path::Path;

use clap::ArgMatches;

use crate::env::Environment;

use super::aliases::process_flag_aliases;
use super::cli::Cli;
use super::docker_env::env_config;
use super::error::ConfigError;
use super::flags::FlagStore;
use super::resolved::ResolvedConfig;
use super::secrets::resolve_secrets;
use super::toml::TomlConfig;

/// Receives the error that halted startup.
///
/// Production code terminates the process here; tests substitute a
/// recording implementation to observe the failure.
pub trait FatalHandler {
    /// Reports a configuration error that makes startup unsafe to continue.
    fn fatal(&self, error: &ConfigError);
}

/// Builds the flag store from parsed CLI values and the optional config file.
///
/// # Errors
///
/// Returns an error if the config file cannot be read, parsed, or applied.
pub fn load_flag_store(cli: &Cli, matches: &ArgMatches) -> Result<FlagStore, ConfigError> {
    let mut store = cli.to_flag_store(matches);
    if let Some(path) = cli.config.as_deref() {
        apply_config_file(&mut store, path)?;
    }
    Ok(store)
}

fn apply_config_file(store: &mut FlagStore, path: &Path) -> Result<(), ConfigError> {
    let file = TomlConfig::load(path)?;
    file.apply(store)?;
    tracing::debug!("Applied config file {}", path.display());
    Ok(())
}

/// Runs secret resolution, alias processing, validation and Docker
/// environment export, in that order.
///
/// The environment is only written once the configuration has validated.
///
/// # Errors
///
/// Returns the first error raised by any step.
pub fn resolve<E: Environment + ?Sized>(
    mut store: FlagStore,
    env: &mut E,
) -> Result<ResolvedConfig, ConfigError> {
    resolve_secrets(&mut store)?;
    process_flag_aliases(&mut store)?;
    let config = ResolvedConfig::from_store(&store)?;
    env_config(&store, env)?;
    Ok(config)
}

/// Like [`resolve`], but reports a failure to `handler` exactly once.
///
/// Returns `None` after the handler returns, so callers never continue
/// with a partial configuration.
pub fn resolve_or_halt<E, H>(store: FlagStore, env: &mut E, handler: &H) -> Option<ResolvedConfig>
where
    E: Environment + ?Sized,
    H: FatalHandler + ?Sized,
{
    match resolve(store, env) {
        Ok(config) => Some(config),
        Err(error) => {
            handler.fatal(&error);
            None
        }
    }
}
