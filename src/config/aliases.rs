//! Reconciliation of legacy and convenience flags with their canonical counterparts.
//!
//! Three groups of aliases are processed, in order:
//!
//! 1. `--porcelain <version>` expands into a fixed notification bundle.
//! 2. `--interval <secs>` is rewritten into `--schedule "@every <secs>s"`;
//!    supplying both is a conflict.
//! 3. `--debug` / `--trace` override `--log-level`.

use std::fmt;
use std::str::FromStr;

use super::defaults;
use super::error::ConfigError;
use super::flags::{FlagStore, flag};

/// Supported porcelain output versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PorcelainVersion {
    /// First porcelain format
    V1,
}

impl PorcelainVersion {
    /// Returns the version token as accepted on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }

    /// Returns the notification template this version selects.
    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::V1 => "porcelain.v1.summary-no-log",
        }
    }
}

impl fmt::Display for PorcelainVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PorcelainVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "v1" => Ok(Self::V1),
            _ => Err(ConfigError::UnknownPorcelain {
                value: s.to_string(),
            }),
        }
    }
}

/// Applies all alias rules to the store.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownPorcelain`] or [`ConfigError::ScheduleConflict`]
/// for contradictory input, and lookup errors if a required flag is not registered.
pub fn process_flag_aliases(store: &mut FlagStore) -> Result<(), ConfigError> {
    apply_porcelain(store)?;
    reconcile_schedule(store)?;
    apply_log_level_aliases(store)
}

/// Expands `--porcelain` into its notification bundle.
///
/// Returns the selected version, or `None` if porcelain mode is off.
/// Notification flags the user set explicitly are left alone.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownPorcelain`] for an unsupported version.
pub fn apply_porcelain(store: &mut FlagStore) -> Result<Option<PorcelainVersion>, ConfigError> {
    let raw = store.string(flag::PORCELAIN)?;
    if raw.is_empty() {
        return Ok(None);
    }
    let version: PorcelainVersion = raw.parse()?;

    if store.append_unique(flag::NOTIFICATION_URL, defaults::LOGGER_URL)? {
        tracing::debug!("Porcelain {version}: added {}", defaults::LOGGER_URL);
    }
    store.set_if_default(flag::NOTIFICATION_LOG_STDOUT, true)?;
    store.set_if_default(flag::NOTIFICATION_REPORT, true)?;
    store.set_if_default(flag::NOTIFICATION_TEMPLATE, version.template())?;

    Ok(Some(version))
}

/// Collapses `--schedule` and `--interval` into a single schedule.
///
/// A flag counts as provided if the user set it through any channel or if it
/// no longer holds its compiled-in default.
///
/// # Errors
///
/// Returns [`ConfigError::ScheduleConflict`] if both are provided, and
/// [`ConfigError::InvalidInterval`] if a provided interval is zero.
pub fn reconcile_schedule(store: &mut FlagStore) -> Result<(), ConfigError> {
    let schedule = store.string(flag::SCHEDULE)?.to_string();
    let interval = store.int(flag::INTERVAL)?;

    let schedule_provided =
        store.is_explicit(flag::SCHEDULE)? || schedule != defaults::SCHEDULE;
    let interval_provided =
        store.is_explicit(flag::INTERVAL)? || interval != defaults::POLL_INTERVAL_SECS;

    match (schedule_provided, interval_provided) {
        (true, true) => Err(ConfigError::ScheduleConflict {
            schedule,
            interval,
        }),
        (false, true) => {
            if interval == 0 {
                return Err(ConfigError::InvalidInterval(interval));
            }
            let derived = defaults::every_seconds(interval);
            tracing::debug!("Using --interval {interval} as schedule '{derived}'");
            store.set(flag::SCHEDULE, derived)
        }
        (_, false) => Ok(()),
    }
}

/// Maps `--debug` and `--trace` onto `--log-level`; trace wins over debug.
///
/// # Errors
///
/// Returns lookup errors if a logging flag is not registered.
pub fn apply_log_level_aliases(store: &mut FlagStore) -> Result<(), ConfigError> {
    if store.bool(flag::DEBUG)? {
        store.set(flag::LOG_LEVEL, "debug")?;
    }
    if store.bool(flag::TRACE)? {
        store.set(flag::LOG_LEVEL, "trace")?;
    }
    Ok(())
}
