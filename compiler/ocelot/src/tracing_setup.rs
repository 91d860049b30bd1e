//! Log output for the CLI.
//!
//! Library crates only emit `tracing` events; this is where they get a
//! subscriber. Nothing is installed unless a filter is configured, and all
//! output goes to stderr so it never mixes with program output.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::CliConfig;

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber described by `config`.
///
/// Safe to call multiple times; only the first call has any effect.
pub fn init_tracing(config: &CliConfig) {
    TRACING_INIT.call_once(|| {
        let Some(directives) = config.log_filter.as_deref() else {
            return;
        };
        let filter = match EnvFilter::try_new(directives) {
            Ok(filter) => filter,
            Err(err) => {
                eprintln!("warning: ignoring log filter '{directives}': {err}");
                return;
            }
        };

        let registry = tracing_subscriber::registry().with(filter);
        let installed = if config.log_tree {
            registry
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_writer(std::io::stderr)
                        .with_targets(true)
                        .with_indent_lines(true),
                )
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .try_init()
        };
        if let Err(err) = installed {
            eprintln!("warning: logging disabled: {err}");
        }
    });
}
