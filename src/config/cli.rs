//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.
//! Every option is bound to an environment variable; clap reports which of
//! the two (or the default) supplied each value, and that is carried into
//! the [`FlagStore`].

use std::path::PathBuf;
use std::time::Duration;

use clap::builder::FalseyValueParser;
use clap::parser::ValueSource;
use clap::{ArgAction, ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};

use super::defaults;
use super::duration::parse_duration;
use super::flags::{FlagSource, FlagStore, FlagValue, flag};

/// Watchtower: automatic container updates
///
/// Resolves the daemon's configuration from flags, environment variables,
/// secret files and an optional config file.
#[derive(Debug, Parser)]
#[command(name = "watchtower")]
#[command(version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are naturally boolean
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to configuration file
    #[arg(long, short, env = "WATCHTOWER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Daemon socket to connect to
    #[arg(long, short = 'H', env = "DOCKER_HOST", default_value = defaults::DOCKER_HOST)]
    pub host: String,

    /// Use TLS when connecting to the Docker socket and verify the server certificate
    #[arg(
        long = "tlsverify",
        short = 'v',
        env = "DOCKER_TLS_VERIFY",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub tls_verify: bool,

    /// The version of the Docker API to use
    #[arg(long = "api-version", short = 'a', env = "DOCKER_API_VERSION")]
    pub api_version: Option<String>,

    /// The cron expression which defines when to update
    #[arg(long, short, env = "WATCHTOWER_SCHEDULE", default_value = defaults::SCHEDULE)]
    pub schedule: String,

    /// Poll interval in seconds
    #[arg(long, short, env = "WATCHTOWER_POLL_INTERVAL", default_value_t = defaults::POLL_INTERVAL_SECS)]
    pub interval: u64,

    /// Timeout before a container is forcefully stopped
    #[arg(
        long = "stop-timeout",
        env = "WATCHTOWER_TIMEOUT",
        value_parser = parse_duration,
        default_value = defaults::STOP_TIMEOUT
    )]
    pub stop_timeout: Duration,

    /// Write session results to stdout using a stable, machine-readable format
    #[arg(long, short = 'P', env = "WATCHTOWER_PORCELAIN", value_name = "VERSION")]
    pub porcelain: Option<String>,

    /// The notification URLs to send notifications to (can be specified multiple times;
    /// the environment variable takes a space-separated list)
    #[arg(
        long = "notification-url",
        env = "WATCHTOWER_NOTIFICATION_URL",
        value_name = "URL"
    )]
    pub notification_urls: Vec<String>,

    /// SMTP server password for sending notifications
    #[arg(
        long = "notification-email-server-password",
        env = "WATCHTOWER_NOTIFICATION_EMAIL_SERVER_PASSWORD"
    )]
    pub notification_email_server_password: Option<String>,

    /// The Slack hook URL to send notifications to
    #[arg(
        long = "notification-slack-hook-url",
        env = "WATCHTOWER_NOTIFICATION_SLACK_HOOK_URL"
    )]
    pub notification_slack_hook_url: Option<String>,

    /// The MSTeams webhook URL to send notifications to
    #[arg(
        long = "notification-msteams-hook",
        env = "WATCHTOWER_NOTIFICATION_MSTEAMS_HOOK_URL"
    )]
    pub notification_msteams_hook: Option<String>,

    /// The Gotify application required to query the Gotify API
    #[arg(
        long = "notification-gotify-token",
        env = "WATCHTOWER_NOTIFICATION_GOTIFY_TOKEN"
    )]
    pub notification_gotify_token: Option<String>,

    /// Write notification logs to stdout instead of logging (to stderr)
    #[arg(
        long = "notification-log-stdout",
        env = "WATCHTOWER_NOTIFICATION_LOG_STDOUT",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub notification_log_stdout: bool,

    /// Use the session report as the notification template data
    #[arg(
        long = "notification-report",
        env = "WATCHTOWER_NOTIFICATION_REPORT",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub notification_report: bool,

    /// The template to use for notifications
    #[arg(long = "notification-template", env = "WATCHTOWER_NOTIFICATION_TEMPLATE")]
    pub notification_template: Option<String>,

    /// Sets an authentication token to HTTP API requests
    #[arg(long = "http-api-token", env = "WATCHTOWER_HTTP_API_TOKEN")]
    pub http_api_token: Option<String>,

    /// Runs Watchtower in HTTP API mode, so that image updates must be triggered by a request
    #[arg(
        long = "http-api-update",
        env = "WATCHTOWER_HTTP_API_UPDATE",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub http_api_update: bool,

    /// Also run periodic updates (specified with --interval and --schedule) if HTTP API is enabled
    #[arg(
        long = "http-api-periodic-polls",
        env = "WATCHTOWER_HTTP_API_PERIODIC_POLLS",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub http_api_periodic_polls: bool,

    /// The maximum log level that will be written to STDERR
    #[arg(long = "log-level", env = "WATCHTOWER_LOG_LEVEL", default_value = defaults::LOG_LEVEL)]
    pub log_level: String,

    /// Enable debug mode with verbose logging
    #[arg(
        long,
        short,
        env = "WATCHTOWER_DEBUG",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub debug: bool,

    /// Enable trace mode with very verbose logging - caution, exposes credentials
    #[arg(
        long,
        env = "WATCHTOWER_TRACE",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub trace: bool,
}

/// Subcommands for watchtower
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "watchtower.toml")]
        output: PathBuf,
    },
}

/// Argument ids (clap derives them from field names) paired with flag names.
const ARG_IDS: &[(&str, &str)] = &[
    ("host", flag::HOST),
    ("tls_verify", flag::TLS_VERIFY),
    ("api_version", flag::API_VERSION),
    ("schedule", flag::SCHEDULE),
    ("interval", flag::INTERVAL),
    ("stop_timeout", flag::STOP_TIMEOUT),
    ("porcelain", flag::PORCELAIN),
    ("notification_urls", flag::NOTIFICATION_URL),
    (
        "notification_email_server_password",
        flag::NOTIFICATION_EMAIL_SERVER_PASSWORD,
    ),
    ("notification_slack_hook_url", flag::NOTIFICATION_SLACK_HOOK_URL),
    ("notification_msteams_hook", flag::NOTIFICATION_MSTEAMS_HOOK),
    ("notification_gotify_token", flag::NOTIFICATION_GOTIFY_TOKEN),
    ("notification_log_stdout", flag::NOTIFICATION_LOG_STDOUT),
    ("notification_report", flag::NOTIFICATION_REPORT),
    ("notification_template", flag::NOTIFICATION_TEMPLATE),
    ("http_api_token", flag::HTTP_API_TOKEN),
    ("http_api_update", flag::HTTP_API_UPDATE),
    ("http_api_periodic_polls", flag::HTTP_API_PERIODIC_POLLS),
    ("log_level", flag::LOG_LEVEL),
    ("debug", flag::DEBUG),
    ("trace", flag::TRACE),
];

impl Cli {
    /// Parses CLI arguments from the command line, keeping the raw matches.
    ///
    /// Exits with a usage message on invalid arguments, like [`Parser::parse`].
    #[must_use]
    pub fn parse_args() -> (Self, ArgMatches) {
        let matches = Self::command().get_matches();
        match Self::from_arg_matches(&matches) {
            Ok(cli) => (cli, matches),
            Err(e) => e.exit(),
        }
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns the clap error for invalid arguments.
    pub fn try_parse_from_iter<I, T>(iter: I) -> Result<(Self, ArgMatches), clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_with(Self::command(), iter)
    }

    /// Parses CLI arguments against a (possibly adjusted) copy of [`Self::command`].
    ///
    /// # Errors
    ///
    /// Returns the clap error for invalid arguments.
    pub fn try_parse_with<I, T>(
        command: clap::Command,
        iter: I,
    ) -> Result<(Self, ArgMatches), clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = command.try_get_matches_from(iter)?;
        let cli = Self::from_arg_matches(&matches)?;
        Ok((cli, matches))
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }

    /// Builds the flag store from the parsed values.
    ///
    /// `matches` must be the matches this `Cli` was built from; it tells
    /// whether each value came from the command line, the environment, or a default.
    #[must_use]
    pub fn to_flag_store(&self, matches: &ArgMatches) -> FlagStore {
        let mut store = FlagStore::new();
        let mut add = |name: &'static str, value: FlagValue| {
            store.insert(name, value, source_of(matches, name));
        };

        add(flag::HOST, self.host.clone().into());
        add(flag::TLS_VERIFY, self.tls_verify.into());
        add(flag::API_VERSION, opt(self.api_version.as_ref()).into());
        add(flag::SCHEDULE, self.schedule.clone().into());
        add(flag::INTERVAL, self.interval.into());
        add(flag::STOP_TIMEOUT, self.stop_timeout.into());
        add(flag::PORCELAIN, opt(self.porcelain.as_ref()).into());
        add(
            flag::NOTIFICATION_URL,
            notification_urls(&self.notification_urls, source_of(matches, flag::NOTIFICATION_URL))
                .into(),
        );
        add(
            flag::NOTIFICATION_EMAIL_SERVER_PASSWORD,
            opt(self.notification_email_server_password.as_ref()).into(),
        );
        add(
            flag::NOTIFICATION_SLACK_HOOK_URL,
            opt(self.notification_slack_hook_url.as_ref()).into(),
        );
        add(
            flag::NOTIFICATION_MSTEAMS_HOOK,
            opt(self.notification_msteams_hook.as_ref()).into(),
        );
        add(
            flag::NOTIFICATION_GOTIFY_TOKEN,
            opt(self.notification_gotify_token.as_ref()).into(),
        );
        add(flag::NOTIFICATION_LOG_STDOUT, self.notification_log_stdout.into());
        add(flag::NOTIFICATION_REPORT, self.notification_report.into());
        add(
            flag::NOTIFICATION_TEMPLATE,
            opt(self.notification_template.as_ref()).into(),
        );
        add(flag::HTTP_API_TOKEN, opt(self.http_api_token.as_ref()).into());
        add(flag::HTTP_API_UPDATE, self.http_api_update.into());
        add(flag::HTTP_API_PERIODIC_POLLS, self.http_api_periodic_polls.into());
        add(flag::LOG_LEVEL, self.log_level.clone().into());
        add(flag::DEBUG, self.debug.into());
        add(flag::TRACE, self.trace.into());

        store
    }
}

/// The environment variable holds a space-separated list; command-line
/// values are taken whole so secret file paths may contain spaces.
fn notification_urls(values: &[String], source: FlagSource) -> Vec<String> {
    if source != FlagSource::Environment {
        return values.to_vec();
    }
    values
        .iter()
        .flat_map(|value| value.split_whitespace())
        .map(str::to_string)
        .collect()
}

fn opt(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

fn source_of(matches: &ArgMatches, name: &str) -> FlagSource {
    let Some(id) = ARG_IDS
        .iter()
        .find(|(_, flag_name)| *flag_name == name)
        .map(|(id, _)| *id)
    else {
        return FlagSource::Default;
    };

    match matches.value_source(id) {
        Some(ValueSource::CommandLine) => FlagSource::CommandLine,
        Some(ValueSource::EnvVariable) => FlagSource::Environment,
        _ => FlagSource::Default,
    }
}
