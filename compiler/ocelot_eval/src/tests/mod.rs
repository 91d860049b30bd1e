//! Evaluator and builtin tests, driven through source text.

mod lazy_tests;

use crate::{base_env_with_printer, buffer_handler, eval_string, Env, EvalError, SharedPrintHandler, Value};

/// A base environment whose `prn` output is captured.
pub(crate) fn test_env() -> (Env, SharedPrintHandler) {
    let printer = buffer_handler();
    (base_env_with_printer(printer.clone()), printer)
}

#[expect(clippy::unwrap_used, reason = "Tests can panic")]
pub(crate) fn run(source: &str) -> Value {
    let (env, _) = test_env();
    eval_string(source, &env).unwrap()
}

#[expect(clippy::unwrap_used, reason = "Tests can panic")]
pub(crate) fn run_err(source: &str) -> EvalError {
    let (env, _) = test_env();
    eval_string(source, &env).unwrap_err()
}
