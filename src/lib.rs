//! Watchtower: startup configuration for a container-update daemon
//!
//! Collapses command-line flags, environment variables, file-backed secrets
//! and an optional config file into one validated configuration, and exports
//! the Docker connection settings to the environment for the Docker client.

pub mod config;
pub mod env;
