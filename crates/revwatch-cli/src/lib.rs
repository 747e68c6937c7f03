//! Command-line and environment surface for the revwatch binary.
//!
//! Flags fall back to environment variables; [`WatchConfig::from_cli`] turns
//! the parsed arguments into a validated startup configuration.

pub mod cli_args;
pub mod watch_config;

pub use cli_args::Cli;
pub use watch_config::{ConfigError, WatchConfig};
