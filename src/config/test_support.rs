//! Shared fixtures for configuration tests.

use std::cell::RefCell;
use std::time::Duration;

use super::defaults;
use super::error::ConfigError;
use super::flags::{FlagSource, FlagStore, flag};
use super::startup::FatalHandler;

/// A store with every flag registered at its compiled-in default,
/// as the CLI layer produces it when nothing is supplied.
pub fn default_store() -> FlagStore {
    FlagStore::new()
        .with_default(flag::HOST, defaults::DOCKER_HOST)
        .with_default(flag::TLS_VERIFY, false)
        .with_default(flag::API_VERSION, "")
        .with_default(flag::SCHEDULE, defaults::SCHEDULE)
        .with_default(flag::INTERVAL, defaults::POLL_INTERVAL_SECS)
        .with_default(flag::STOP_TIMEOUT, defaults::stop_timeout())
        .with_default(flag::PORCELAIN, "")
        .with_default(flag::NOTIFICATION_URL, Vec::<String>::new())
        .with_default(flag::NOTIFICATION_EMAIL_SERVER_PASSWORD, "")
        .with_default(flag::NOTIFICATION_SLACK_HOOK_URL, "")
        .with_default(flag::NOTIFICATION_MSTEAMS_HOOK, "")
        .with_default(flag::NOTIFICATION_GOTIFY_TOKEN, "")
        .with_default(flag::NOTIFICATION_LOG_STDOUT, false)
        .with_default(flag::NOTIFICATION_REPORT, false)
        .with_default(flag::NOTIFICATION_TEMPLATE, "")
        .with_default(flag::HTTP_API_TOKEN, "")
        .with_default(flag::HTTP_API_UPDATE, false)
        .with_default(flag::HTTP_API_PERIODIC_POLLS, false)
        .with_default(flag::LOG_LEVEL, defaults::LOG_LEVEL)
        .with_default(flag::DEBUG, false)
        .with_default(flag::TRACE, false)
}

/// Shorthand for a value passed on the command line.
pub const CLI: FlagSource = FlagSource::CommandLine;

/// Shorthand for a value read from the environment.
pub const ENV: FlagSource = FlagSource::Environment;

/// Duration helper for readability in assertions.
pub const fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

/// Fatal handler that records errors instead of exiting.
#[derive(Default)]
pub struct RecordingHandler {
    errors: RefCell<Vec<String>>,
}

impl RecordingHandler {
    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }
}

impl FatalHandler for RecordingHandler {
    fn fatal(&self, error: &ConfigError) {
        self.errors.borrow_mut().push(error.to_string());
    }
}
