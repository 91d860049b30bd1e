//! The `eval` command: evaluate one expression and print its value.

use ocelot_eval::eval_string;
use tracing::debug;

use crate::cli_env;

/// Evaluate `source`, print the result, and exit 1 on failure.
pub fn eval_expr(source: &str) {
    let env = cli_env();
    match eval_string(source, &env) {
        Ok(value) => println!("{value}"),
        Err(err) => {
            debug!(kind = ?err.kind, "one-shot evaluation failed");
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}
