//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default Docker daemon endpoint.
pub const DOCKER_HOST: &str = "unix:///var/run/docker.sock";

/// Default polling interval in seconds (one day).
pub const POLL_INTERVAL_SECS: u64 = 86_400;

/// Default schedule, equivalent to polling every [`POLL_INTERVAL_SECS`].
pub const SCHEDULE: &str = "@every 86400s";

/// Default container stop timeout, as accepted by `--stop-timeout`.
pub const STOP_TIMEOUT: &str = "10s";

/// Default container stop timeout in seconds.
pub const STOP_TIMEOUT_SECS: u64 = 10;

/// Default log level.
pub const LOG_LEVEL: &str = "info";

/// Notification URL that routes notifications to the daemon's own log.
pub const LOGGER_URL: &str = "logger://";

/// Default container stop timeout as Duration.
#[must_use]
pub const fn stop_timeout() -> Duration {
    Duration::from_secs(STOP_TIMEOUT_SECS)
}

/// Builds the fixed-rate schedule expression for an interval in seconds.
#[must_use]
pub fn every_seconds(secs: u64) -> String {
    format!("@every {secs}s")
}
