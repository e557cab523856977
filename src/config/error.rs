//! Error types for configuration loading, resolution and validation.

use std::path::PathBuf;

use thiserror::Error;

use super::flags::FlagKind;

/// Error type for configuration operations.
///
/// Covers errors from the config file, secret files, flag store wiring,
/// and the alias rules applied before the daemon starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A secret-bearing flag points at a file that could not be read.
    #[error("Failed to read secret for --{flag} from '{}': {source}", path.display())]
    SecretRead {
        /// Name of the flag holding the path
        flag: &'static str,
        /// Path named by the flag value
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A flag was looked up that was never registered in the store.
    #[error("Flag --{0} is not registered")]
    UnknownFlag(String),

    /// A flag holds a value of a different type than the caller expected.
    #[error("Flag --{flag} holds a {actual} value, expected {expected}")]
    FlagType {
        /// Name of the flag
        flag: &'static str,
        /// Type the caller asked for
        expected: FlagKind,
        /// Type actually stored
        actual: FlagKind,
    },

    /// Porcelain version not in the supported set.
    #[error("Unknown porcelain version '{value}': supported values: v1")]
    UnknownPorcelain {
        /// The rejected version token
        value: String,
    },

    /// Both `--schedule` and `--interval` were provided.
    #[error("Only schedule or interval can be defined, not both (schedule: '{schedule}', interval: {interval}s)")]
    ScheduleConflict {
        /// Schedule the user provided
        schedule: String,
        /// Interval the user provided
        interval: u64,
    },

    /// Interval cannot be turned into a schedule.
    #[error("Invalid interval {0}s: must be greater than 0")]
    InvalidInterval(u64),

    /// Log level not recognized.
    #[error("Invalid log level '{value}': expected error, warn, info, debug, or trace")]
    InvalidLogLevel {
        /// The invalid value provided
        value: String,
    },

    /// Invalid duration value.
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },
}

impl ConfigError {
    /// Returns true for contradictory or unsupported flag combinations.
    ///
    /// These are the conditions the alias rules refuse to guess about,
    /// as opposed to I/O failures or wiring defects.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::UnknownPorcelain { .. } | Self::ScheduleConflict { .. }
        )
    }
}
