//! Command handlers for the Ocelot CLI.
//!
//! Each submodule implements one command. Handlers report failures on
//! stderr and exit with status 1; shared helpers live here.

mod eval;
mod repl;
mod run;

pub use eval::eval_expr;
pub use repl::{repl, run_repl, CONTINUATION_PROMPT};
pub use run::run_file;

/// Read a source file, exiting with a readable message if that fails.
pub(super) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}
