//! Ocelot CLI
//!
//! The library half of the `ocelot` binary: command handlers, settings,
//! logging setup and the host functions added on top of the builtins.

pub mod commands;
pub mod config;
pub mod host;
pub mod tracing_setup;

pub use config::CliConfig;

use ocelot_eval::{base_env, Env};

/// The environment every command evaluates in: the builtins plus the host
/// functions from [`host`].
pub fn cli_env() -> Env {
    let env = base_env();
    host::install(&env);
    env
}
