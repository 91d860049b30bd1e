//! Ocelot Eval - the evaluator and builtin library.
//!
//! # Entry points
//!
//! - [`base_env`]: a fresh root environment with every builtin registered
//! - [`eval_string`]: read and evaluate source text
//! - [`eval`]: evaluate one AST value to a final value
//! - [`eval_tail`]: suspend evaluation for a tail position
//!
//! Host programs add their own functions with [`Env::define_native`].
//!
//! # Re-exports
//!
//! Value and environment types come from `ocelot_ir`.

mod builtins;
mod closure;
mod eval;
mod print_handler;

pub use builtins::{base_env, base_env_with_printer, builtin_names};
pub use eval::{call_form, eval, eval_ast, eval_string, eval_tail};
pub use print_handler::{
    buffer_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl, SharedPrintHandler,
    StdoutPrintHandler,
};

pub use ocelot_ir::{Env, EvalError, EvalErrorKind, EvalResult, Thunk, Value};

#[cfg(test)]
mod tests;
