//! The `run` command: evaluate every form of a source file in order.

use ocelot_eval::eval_string;
use tracing::debug;

use super::read_file;
use crate::cli_env;

/// Run an Ocelot source file. Output comes only from `prn`.
pub fn run_file(path: &str) {
    let source = read_file(path);
    debug!(path, bytes = source.len(), "running file");
    let env = cli_env();
    if let Err(err) = eval_string(&source, &env) {
        eprintln!("error in '{path}': {err}");
        std::process::exit(1);
    }
}
