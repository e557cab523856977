//! The flag store: every configuration flag, its typed value, and where that value came from.
//!
//! The store is populated once from the CLI layer (and optionally a config file),
//! then mutated in place by secret resolution and alias processing. Tracking the
//! [`FlagSource`] next to each value is what lets the alias rules tell
//! "the user asked for this" apart from "this is the compiled-in default".

use std::fmt;
use std::time::Duration;

use super::error::ConfigError;

/// Well-known flag names.
///
/// Names match the long form of the command-line flag, without the leading `--`.
pub mod flag {
    /// Docker daemon endpoint.
    pub const HOST: &str = "host";
    /// Use TLS and verify the remote.
    pub const TLS_VERIFY: &str = "tlsverify";
    /// Docker API version.
    pub const API_VERSION: &str = "api-version";
    /// Cron-style update schedule.
    pub const SCHEDULE: &str = "schedule";
    /// Legacy poll interval in seconds.
    pub const INTERVAL: &str = "interval";
    /// Timeout before a container is forcefully stopped.
    pub const STOP_TIMEOUT: &str = "stop-timeout";
    /// Porcelain output preset.
    pub const PORCELAIN: &str = "porcelain";
    /// Notification destination URLs.
    pub const NOTIFICATION_URL: &str = "notification-url";
    /// SMTP password for email notifications.
    pub const NOTIFICATION_EMAIL_SERVER_PASSWORD: &str = "notification-email-server-password";
    /// Slack webhook URL.
    pub const NOTIFICATION_SLACK_HOOK_URL: &str = "notification-slack-hook-url";
    /// Microsoft Teams webhook URL.
    pub const NOTIFICATION_MSTEAMS_HOOK: &str = "notification-msteams-hook";
    /// Gotify application token.
    pub const NOTIFICATION_GOTIFY_TOKEN: &str = "notification-gotify-token";
    /// Also write notifications to stdout.
    pub const NOTIFICATION_LOG_STDOUT: &str = "notification-log-stdout";
    /// Send a session report instead of individual entries.
    pub const NOTIFICATION_REPORT: &str = "notification-report";
    /// Notification template name or body.
    pub const NOTIFICATION_TEMPLATE: &str = "notification-template";
    /// Token guarding the HTTP API.
    pub const HTTP_API_TOKEN: &str = "http-api-token";
    /// Enable the HTTP API update endpoint.
    pub const HTTP_API_UPDATE: &str = "http-api-update";
    /// Keep periodic polls when the HTTP API is enabled.
    pub const HTTP_API_PERIODIC_POLLS: &str = "http-api-periodic-polls";
    /// Log verbosity.
    pub const LOG_LEVEL: &str = "log-level";
    /// Shorthand for `--log-level debug`.
    pub const DEBUG: &str = "debug";
    /// Shorthand for `--log-level trace`.
    pub const TRACE: &str = "trace";
}

/// Where a flag's current value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagSource {
    /// Compiled-in default; the user did not supply anything.
    Default,
    /// Read from the TOML configuration file.
    ConfigFile,
    /// Read from the bound environment variable.
    Environment,
    /// Passed on the command line.
    CommandLine,
}

impl FlagSource {
    /// Returns true if the user supplied the value through any channel.
    #[must_use]
    pub const fn is_explicit(self) -> bool {
        !matches!(self, Self::Default)
    }
}

/// The type of a flag value, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// Free-form string
    String,
    /// Boolean switch
    Bool,
    /// Unsigned integer
    Int,
    /// Time span
    Duration,
    /// Repeatable string
    StringArray,
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Duration => "duration",
            Self::StringArray => "stringArray",
        };
        f.write_str(name)
    }
}

/// A typed flag value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    /// Free-form string
    String(String),
    /// Boolean switch
    Bool(bool),
    /// Unsigned integer
    Int(u64),
    /// Time span
    Duration(Duration),
    /// Repeatable string, in the order given
    StringArray(Vec<String>),
}

impl FlagValue {
    /// Returns the kind of this value.
    #[must_use]
    pub const fn kind(&self) -> FlagKind {
        match self {
            Self::String(_) => FlagKind::String,
            Self::Bool(_) => FlagKind::Bool,
            Self::Int(_) => FlagKind::Int,
            Self::Duration(_) => FlagKind::Duration,
            Self::StringArray(_) => FlagKind::StringArray,
        }
    }
}

impl From<&str> for FlagValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FlagValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<u64> for FlagValue {
    fn from(value: u64) -> Self {
        Self::Int(value)
    }
}

impl From<Duration> for FlagValue {
    fn from(value: Duration) -> Self {
        Self::Duration(value)
    }
}

impl From<Vec<String>> for FlagValue {
    fn from(value: Vec<String>) -> Self {
        Self::StringArray(value)
    }
}

/// A single entry in the [`FlagStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    value: FlagValue,
    source: FlagSource,
}

impl Flag {
    /// Returns the current value.
    #[must_use]
    pub const fn value(&self) -> &FlagValue {
        &self.value
    }

    /// Returns where the current value came from.
    #[must_use]
    pub const fn source(&self) -> FlagSource {
        self.source
    }

    /// Returns true if the user supplied the value.
    #[must_use]
    pub const fn is_explicit(&self) -> bool {
        self.source.is_explicit()
    }
}

/// Ordered mapping from flag name to [`Flag`].
///
/// Flags are registered once with their kind fixed by the first value;
/// later writes must keep the same kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagStore {
    flags: Vec<(&'static str, Flag)>,
}

impl FlagStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { flags: Vec::new() }
    }

    /// Registers a flag, or replaces an existing registration with the same name.
    pub fn insert(&mut self, name: &'static str, value: impl Into<FlagValue>, source: FlagSource) {
        let flag = Flag {
            value: value.into(),
            source,
        };
        match self.flags.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = flag,
            None => self.flags.push((name, flag)),
        }
    }

    /// Builder form of [`insert`](Self::insert) with [`FlagSource::Default`].
    #[must_use]
    pub fn with_default(mut self, name: &'static str, value: impl Into<FlagValue>) -> Self {
        self.insert(name, value, FlagSource::Default);
        self
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(
        mut self,
        name: &'static str,
        value: impl Into<FlagValue>,
        source: FlagSource,
    ) -> Self {
        self.insert(name, value, source);
        self
    }

    /// Returns the number of registered flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Returns true if no flags are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Iterates flags in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Flag)> {
        self.flags.iter().map(|(name, flag)| (*name, flag))
    }

    /// Looks up a registered flag.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownFlag`] if the flag is not registered.
    pub fn get(&self, name: &str) -> Result<&Flag, ConfigError> {
        self.named(name).map(|(_, flag)| flag)
    }

    fn get_mut(&mut self, name: &str) -> Result<(&'static str, &mut Flag), ConfigError> {
        self.flags
            .iter_mut()
            .find(|(n, _)| *n == name)
            .map(|(n, flag)| (*n, flag))
            .ok_or_else(|| ConfigError::UnknownFlag(name.to_string()))
    }

    /// Returns true if the user supplied a value for the flag.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownFlag`] if the flag is not registered.
    pub fn is_explicit(&self, name: &str) -> Result<bool, ConfigError> {
        self.get(name).map(Flag::is_explicit)
    }

    /// Reads a string flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the flag is unknown or not a string.
    pub fn string(&self, name: &str) -> Result<&str, ConfigError> {
        let (name, flag) = self.named(name)?;
        match &flag.value {
            FlagValue::String(s) => Ok(s),
            other => Err(type_error(name, FlagKind::String, other)),
        }
    }

    /// Reads a boolean flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the flag is unknown or not a bool.
    pub fn bool(&self, name: &str) -> Result<bool, ConfigError> {
        let (name, flag) = self.named(name)?;
        match flag.value {
            FlagValue::Bool(b) => Ok(b),
            ref other => Err(type_error(name, FlagKind::Bool, other)),
        }
    }

    /// Reads an integer flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the flag is unknown or not an integer.
    pub fn int(&self, name: &str) -> Result<u64, ConfigError> {
        let (name, flag) = self.named(name)?;
        match flag.value {
            FlagValue::Int(i) => Ok(i),
            ref other => Err(type_error(name, FlagKind::Int, other)),
        }
    }

    /// Reads a duration flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the flag is unknown or not a duration.
    pub fn duration(&self, name: &str) -> Result<Duration, ConfigError> {
        let (name, flag) = self.named(name)?;
        match flag.value {
            FlagValue::Duration(d) => Ok(d),
            ref other => Err(type_error(name, FlagKind::Duration, other)),
        }
    }

    /// Reads a string-array flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the flag is unknown or not a string array.
    pub fn string_array(&self, name: &str) -> Result<&[String], ConfigError> {
        let (name, flag) = self.named(name)?;
        match &flag.value {
            FlagValue::StringArray(values) => Ok(values),
            other => Err(type_error(name, FlagKind::StringArray, other)),
        }
    }

    /// Replaces a flag's value, keeping its source.
    ///
    /// # Errors
    ///
    /// Returns an error if the flag is unknown or the new value has a different kind.
    pub fn set(&mut self, name: &str, value: impl Into<FlagValue>) -> Result<(), ConfigError> {
        let value = value.into();
        let (name, flag) = self.get_mut(name)?;
        if flag.value.kind() != value.kind() {
            return Err(ConfigError::FlagType {
                flag: name,
                expected: flag.value.kind(),
                actual: value.kind(),
            });
        }
        flag.value = value;
        Ok(())
    }

    /// Replaces a flag's value only if it still holds its default.
    ///
    /// The flag keeps [`FlagSource::Default`]. Returns true if the value was replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the flag is unknown or the new value has a different kind.
    pub fn set_if_default(
        &mut self,
        name: &str,
        value: impl Into<FlagValue>,
    ) -> Result<bool, ConfigError> {
        if self.is_explicit(name)? {
            return Ok(false);
        }
        self.set(name, value)?;
        Ok(true)
    }

    /// Supplies a value from a lower-priority channel.
    ///
    /// Only flags still holding their default are filled; the new value is
    /// recorded with `source`. Returns true if the value was taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the flag is unknown or the new value has a different kind.
    pub fn fill(
        &mut self,
        name: &str,
        value: impl Into<FlagValue>,
        source: FlagSource,
    ) -> Result<bool, ConfigError> {
        if !self.set_if_default(name, value)? {
            return Ok(false);
        }
        let (_, flag) = self.get_mut(name)?;
        flag.source = source;
        Ok(true)
    }

    /// Appends to a string-array flag unless the value is already present.
    ///
    /// Returns true if the value was appended.
    ///
    /// # Errors
    ///
    /// Returns an error if the flag is unknown or not a string array.
    pub fn append_unique(&mut self, name: &str, value: &str) -> Result<bool, ConfigError> {
        let (name, flag) = self.get_mut(name)?;
        match &mut flag.value {
            FlagValue::StringArray(values) => {
                if values.iter().any(|v| v == value) {
                    return Ok(false);
                }
                values.push(value.to_string());
                Ok(true)
            }
            other => Err(type_error(name, FlagKind::StringArray, other)),
        }
    }

    fn named(&self, name: &str) -> Result<(&'static str, &Flag), ConfigError> {
        self.flags
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(n, flag)| (*n, flag))
            .ok_or_else(|| ConfigError::UnknownFlag(name.to_string()))
    }
}

fn type_error(flag: &'static str, expected: FlagKind, actual: &FlagValue) -> ConfigError {
    ConfigError::FlagType {
        flag,
        expected,
        actual: actual.kind(),
    }
}
