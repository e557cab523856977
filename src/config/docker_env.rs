//! Export of Docker connection flags to environment variables.
//!
//! The Docker client reads its connection settings from the environment
//! only, so the resolved flags are mirrored into `DOCKER_*` variables.

use crate::env::Environment;

use super::error::ConfigError;
use super::flags::{FlagKind, FlagStore, FlagValue, flag};

/// Environment variable names read by the Docker client.
pub mod var {
    /// Docker daemon endpoint.
    pub const DOCKER_HOST: &str = "DOCKER_HOST";
    /// Set to `1` to enable TLS verification.
    pub const DOCKER_TLS_VERIFY: &str = "DOCKER_TLS_VERIFY";
    /// Docker API version to negotiate.
    pub const DOCKER_API_VERSION: &str = "DOCKER_API_VERSION";
}

/// Flag to environment variable mapping, in export order.
pub const DOCKER_ENV: &[(&str, &str)] = &[
    (flag::HOST, var::DOCKER_HOST),
    (flag::TLS_VERIFY, var::DOCKER_TLS_VERIFY),
    (flag::API_VERSION, var::DOCKER_API_VERSION),
];

/// Mirrors the Docker connection flags into `env`.
///
/// A flag is exported when it has a value (non-empty string, or `true` for
/// booleans). A flag still holding its default does not replace a variable
/// the operator already set. Every flag is read before the first variable
/// is written, so `env` is left untouched on error.
///
/// # Errors
///
/// Returns an error if a Docker flag is not registered or has an unexpected type.
pub fn env_config<E: Environment + ?Sized>(
    store: &FlagStore,
    env: &mut E,
) -> Result<(), ConfigError> {
    let mut exports = Vec::with_capacity(DOCKER_ENV.len());
    for &(name, key) in DOCKER_ENV {
        let flag = store.get(name)?;
        if let Some(value) = export_value(name, flag.value())? {
            exports.push((name, key, value, flag.is_explicit()));
        }
    }

    for (name, key, value, explicit) in exports {
        match env.var(key) {
            Some(current) if current == value => {}
            Some(_) if !explicit => {
                tracing::debug!("Keeping existing {key}; --{name} holds its default");
            }
            _ => {
                tracing::debug!("Setting {key} from --{name}");
                env.set_var(key, &value);
            }
        }
    }
    Ok(())
}

fn export_value(name: &'static str, value: &FlagValue) -> Result<Option<String>, ConfigError> {
    match value {
        FlagValue::String(s) if s.is_empty() => Ok(None),
        FlagValue::String(s) => Ok(Some(s.clone())),
        FlagValue::Bool(true) => Ok(Some("1".to_string())),
        FlagValue::Bool(false) => Ok(None),
        other => Err(ConfigError::FlagType {
            flag: name,
            expected: FlagKind::String,
            actual: other.kind(),
        }),
    }
}
