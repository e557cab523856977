//! Resolved configuration handed to the daemon's collaborators.
//!
//! Built from the flag store after secrets and aliases have been processed.
//! All validation is performed during construction.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use tracing::Level;

use super::aliases::PorcelainVersion;
use super::error::ConfigError;
use super::flags::{FlagStore, flag};

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages (default)
    Info,
    /// Debug output
    Debug,
    /// Everything, including secrets in some collaborators
    Trace,
}

impl LogLevel {
    /// Returns the lowercase level name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(ConfigError::InvalidLogLevel {
                value: s.to_string(),
            }),
        }
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
        }
    }
}

/// Docker connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockerSettings {
    /// Daemon endpoint
    pub host: String,
    /// Verify the daemon's TLS certificate
    pub tls_verify: bool,
    /// API version to negotiate, if pinned
    pub api_version: Option<String>,
}

/// Notification settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationSettings {
    /// Destination URLs in the order given
    pub urls: Vec<String>,
    /// Also write notifications to stdout
    pub log_stdout: bool,
    /// Send a session report
    pub report: bool,
    /// Template name or body
    pub template: Option<String>,
    /// SMTP password
    pub email_server_password: Option<String>,
    /// Slack webhook URL
    pub slack_hook_url: Option<String>,
    /// Microsoft Teams webhook URL
    pub msteams_hook: Option<String>,
    /// Gotify token
    pub gotify_token: Option<String>,
}

/// HTTP API settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpApiSettings {
    /// Token required on API requests
    pub token: Option<String>,
    /// Updates are triggered through the API
    pub update: bool,
    /// Keep the schedule running alongside API-triggered updates
    pub periodic_polls: bool,
}

/// Fully resolved configuration ready for use by the daemon.
///
/// # Construction
///
/// Use [`ResolvedConfig::from_store`] once secrets and aliases have been
/// processed; it re-validates the string-typed enums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Docker connection settings
    pub docker: DockerSettings,

    /// Update schedule (cron expression or descriptor)
    pub schedule: String,

    /// Timeout before a container is forcefully stopped
    pub stop_timeout: Duration,

    /// Porcelain preset in effect, if any
    pub porcelain: Option<PorcelainVersion>,

    /// Notification settings
    pub notifications: NotificationSettings,

    /// HTTP API settings
    pub http_api: HttpApiSettings,

    /// Log verbosity
    pub log_level: LogLevel,
}

impl fmt::Display for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let porcelain = self
            .porcelain
            .map_or_else(|| "off".to_string(), |v| v.to_string());

        write!(
            f,
            "Config {{ host: {}, tls_verify: {}, api_version: {}, schedule: '{}', \
             stop_timeout: {}s, porcelain: {}, notification_urls: {}, report: {}, \
             http_api_token: {}, http_api_update: {}, periodic_polls: {}, log_level: {} }}",
            self.docker.host,
            self.docker.tls_verify,
            self.docker.api_version.as_deref().unwrap_or("auto"),
            self.schedule,
            self.stop_timeout.as_secs(),
            porcelain,
            self.notifications.urls.len(),
            self.notifications.report,
            redacted(self.http_api.token.as_ref()),
            self.http_api.update,
            self.http_api.periodic_polls,
            self.log_level,
        )
    }
}

impl ResolvedConfig {
    /// Reads the final flag values into a typed configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a flag is missing or mistyped, the porcelain
    /// version is unknown, or the log level is invalid.
    pub fn from_store(store: &FlagStore) -> Result<Self, ConfigError> {
        let porcelain = non_empty(store.string(flag::PORCELAIN)?)
            .map(|raw| raw.parse::<PorcelainVersion>())
            .transpose()?;

        Ok(Self {
            docker: DockerSettings {
                host: store.string(flag::HOST)?.to_string(),
                tls_verify: store.bool(flag::TLS_VERIFY)?,
                api_version: non_empty(store.string(flag::API_VERSION)?),
            },
            schedule: store.string(flag::SCHEDULE)?.to_string(),
            stop_timeout: store.duration(flag::STOP_TIMEOUT)?,
            porcelain,
            notifications: NotificationSettings {
                urls: store.string_array(flag::NOTIFICATION_URL)?.to_vec(),
                log_stdout: store.bool(flag::NOTIFICATION_LOG_STDOUT)?,
                report: store.bool(flag::NOTIFICATION_REPORT)?,
                template: non_empty(store.string(flag::NOTIFICATION_TEMPLATE)?),
                email_server_password: non_empty(
                    store.string(flag::NOTIFICATION_EMAIL_SERVER_PASSWORD)?,
                ),
                slack_hook_url: non_empty(store.string(flag::NOTIFICATION_SLACK_HOOK_URL)?),
                msteams_hook: non_empty(store.string(flag::NOTIFICATION_MSTEAMS_HOOK)?),
                gotify_token: non_empty(store.string(flag::NOTIFICATION_GOTIFY_TOKEN)?),
            },
            http_api: HttpApiSettings {
                token: non_empty(store.string(flag::HTTP_API_TOKEN)?),
                update: store.bool(flag::HTTP_API_UPDATE)?,
                periodic_polls: store.bool(flag::HTTP_API_PERIODIC_POLLS)?,
            },
            log_level: store.string(flag::LOG_LEVEL)?.parse()?,
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

const fn redacted(value: Option<&String>) -> &'static str {
    if value.is_some() { "<set>" } else { "none" }
}
