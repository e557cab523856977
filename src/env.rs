//! Environment variable abstraction for testability.
//!
//! This module provides an [`Environment`] trait so that code exporting
//! configuration to environment variables can target the real process
//! environment in production and an in-memory map in tests.

use std::collections::BTreeMap;

/// Read/write access to a set of environment variables.
///
/// # Example
///
/// ```
/// use watchtower::env::{Environment, MapEnvironment};
///
/// let mut env = MapEnvironment::new().with_var("DOCKER_HOST", "tcp://10.0.0.1:2375");
/// env.set_var("DOCKER_TLS_VERIFY", "1");
///
/// assert_eq!(env.var("DOCKER_HOST").as_deref(), Some("tcp://10.0.0.1:2375"));
/// assert_eq!(env.var("DOCKER_TLS_VERIFY").as_deref(), Some("1"));
/// ```
pub trait Environment {
    /// Returns the value of `key`, or `None` if unset or not valid Unicode.
    fn var(&self, key: &str) -> Option<String>;

    /// Sets `key` to `value`, replacing any previous value.
    fn set_var(&mut self, key: &str, value: &str);
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn set_var(&mut self, key: &str, value: &str) {
        // SAFETY: only called from the single-threaded startup sequence,
        // before any other thread is spawned.
        unsafe { std::env::set_var(key, value) };
    }
}

/// In-memory environment backed by a sorted map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnvironment {
    vars: BTreeMap<String, String>,
}

impl MapEnvironment {
    /// Creates an empty environment.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vars: BTreeMap::new(),
        }
    }

    /// Builder that presets a variable.
    #[must_use]
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.set_var(key, value);
        self
    }

    /// Returns all variables in key order.
    #[must_use]
    pub const fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }
}

impl Environment for MapEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn set_var(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }
}
