//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde. File values
//! only fill flags that were not supplied on the command line or through
//! their environment variable.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;
use super::duration::parse_duration;
use super::flags::{FlagSource, FlagStore, FlagValue, flag};

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Docker connection section
    #[serde(default)]
    pub docker: DockerSection,

    /// Update scheduling section
    #[serde(default)]
    pub schedule: ScheduleSection,

    /// Notification section
    #[serde(default)]
    pub notifications: NotificationSection,

    /// HTTP API section
    #[serde(default)]
    pub http_api: HttpApiSection,

    /// Logging section
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Docker connection section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DockerSection {
    /// Docker daemon endpoint
    pub host: Option<String>,

    /// Use TLS and verify the remote
    pub tls_verify: Option<bool>,

    /// Docker API version
    pub api_version: Option<String>,
}

/// Update scheduling section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleSection {
    /// Cron-style schedule
    pub cron: Option<String>,

    /// Poll interval in seconds (mutually exclusive with `cron`)
    pub interval: Option<u64>,

    /// Container stop timeout, e.g. "10s" or "1m30s"
    pub stop_timeout: Option<String>,
}

/// Notification section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotificationSection {
    /// Porcelain preset version
    pub porcelain: Option<String>,

    /// Notification URLs (entries may be secret file paths)
    pub urls: Option<Vec<String>>,

    /// Also write notifications to stdout
    pub log_stdout: Option<bool>,

    /// Send a session report
    pub report: Option<bool>,

    /// Template name or body
    pub template: Option<String>,

    /// SMTP password or path to a file holding it
    pub email_server_password: Option<String>,

    /// Slack webhook URL or path to a file holding it
    pub slack_hook_url: Option<String>,

    /// Microsoft Teams webhook URL or path to a file holding it
    pub msteams_hook: Option<String>,

    /// Gotify token or path to a file holding it
    pub gotify_token: Option<String>,
}

/// HTTP API section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpApiSection {
    /// API token or path to a file holding it
    pub token: Option<String>,

    /// Enable the update endpoint
    pub update: Option<bool>,

    /// Keep periodic polls alongside the update endpoint
    pub periodic_polls: Option<bool>,
}

/// Logging section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// Log level: error, warn, info, debug, or trace
    pub level: Option<String>,

    /// Shorthand for level = "debug"
    pub debug: Option<bool>,

    /// Shorthand for level = "trace"
    pub trace: Option<bool>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    /// Fills every flag that still holds its default with the file's value.
    ///
    /// Filled flags are recorded as [`FlagSource::ConfigFile`].
    ///
    /// # Errors
    ///
    /// Returns an error if `stop_timeout` is not a valid duration or a
    /// target flag is not registered.
    pub fn apply(&self, store: &mut FlagStore) -> Result<(), ConfigError> {
        let stop_timeout = self
            .schedule
            .stop_timeout
            .as_deref()
            .map(parse_duration)
            .transpose()
            .map_err(|reason| ConfigError::InvalidDuration {
                field: "schedule.stop_timeout",
                reason,
            })?;

        let n = &self.notifications;
        let entries: Vec<(&str, Option<FlagValue>)> = vec![
            (flag::HOST, self.docker.host.clone().map(Into::into)),
            (flag::TLS_VERIFY, self.docker.tls_verify.map(Into::into)),
            (flag::API_VERSION, self.docker.api_version.clone().map(Into::into)),
            (flag::SCHEDULE, self.schedule.cron.clone().map(Into::into)),
            (flag::INTERVAL, self.schedule.interval.map(Into::into)),
            (flag::STOP_TIMEOUT, stop_timeout.map(Into::into)),
            (flag::PORCELAIN, n.porcelain.clone().map(Into::into)),
            (flag::NOTIFICATION_URL, n.urls.clone().map(Into::into)),
            (flag::NOTIFICATION_LOG_STDOUT, n.log_stdout.map(Into::into)),
            (flag::NOTIFICATION_REPORT, n.report.map(Into::into)),
            (flag::NOTIFICATION_TEMPLATE, n.template.clone().map(Into::into)),
            (
                flag::NOTIFICATION_EMAIL_SERVER_PASSWORD,
                n.email_server_password.clone().map(Into::into),
            ),
            (
                flag::NOTIFICATION_SLACK_HOOK_URL,
                n.slack_hook_url.clone().map(Into::into),
            ),
            (
                flag::NOTIFICATION_MSTEAMS_HOOK,
                n.msteams_hook.clone().map(Into::into),
            ),
            (
                flag::NOTIFICATION_GOTIFY_TOKEN,
                n.gotify_token.clone().map(Into::into),
            ),
            (flag::HTTP_API_TOKEN, self.http_api.token.clone().map(Into::into)),
            (flag::HTTP_API_UPDATE, self.http_api.update.map(Into::into)),
            (
                flag::HTTP_API_PERIODIC_POLLS,
                self.http_api.periodic_polls.map(Into::into),
            ),
            (flag::LOG_LEVEL, self.logging.level.clone().map(Into::into)),
            (flag::DEBUG, self.logging.debug.map(Into::into)),
            (flag::TRACE, self.logging.trace.map(Into::into)),
        ];

        for (name, value) in entries {
            if let Some(value) = value {
                store.fill(name, value, FlagSource::ConfigFile)?;
            }
        }

        Ok(())
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# Watchtower Configuration File
#
# Values here apply only when the matching command-line flag and
# environment variable are both absent.
# Secret values may be given directly or as a path to a file holding them.

[docker]
# Docker daemon endpoint (default: unix:///var/run/docker.sock)
# host = "unix:///var/run/docker.sock"

# Use TLS when connecting to the Docker socket and verify the server certificate
# tls_verify = false

# Docker API version to negotiate
# api_version = "1.44"

[schedule]
# Cron expression (6 fields, with seconds) or a descriptor such as "@hourly"
# Note: cron and interval are mutually exclusive
# cron = "0 0 4 * * *"

# Poll interval in seconds (default: 86400)
# interval = 86400

# Timeout before a container is forcefully stopped (default: 10s)
# stop_timeout = "10s"

[notifications]
# Porcelain preset; "v1" is the only supported version
# porcelain = "v1"

# Notification URLs; an entry may be a file with one URL per line
# urls = ["smtp://user@mail.example.com:587/?to=ops@example.com"]

# log_stdout = false
# report = false
# template = ""

# email_server_password = "/run/secrets/smtp_password"
# slack_hook_url = ""
# msteams_hook = ""
# gotify_token = ""

[http_api]
# token = "/run/secrets/watchtower_token"
# update = false
# periodic_polls = false

[logging]
# One of: error, warn, info, debug, trace (default: info)
# level = "info"
# debug = false
# trace = false
"#
    .to_string()
}
