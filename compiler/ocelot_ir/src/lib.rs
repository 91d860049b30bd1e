//! Ocelot IR - runtime data shared by the reader and the evaluator.
//!
//! # Contents
//!
//! - `Value`: the closed set of runtime values, plus `Number`, `Symbol`,
//!   `Key` and `Position`
//! - `Env`: the lexical environment chain with lazy and async bindings
//! - `Thunk`: suspended computations and the trampoline that forces them
//! - `EvalError`: structured evaluation errors with a logical backtrace
//! - `ensure_sufficient_stack`: on-demand stack growth for deep recursion

pub mod env;
pub mod errors;
mod stack;
pub mod thunk;
pub mod value;

pub use env::Env;
pub use errors::{
    Arity, BacktraceFrame, EvalBacktrace, EvalError, EvalErrorKind, EvalResult,
};
pub use stack::ensure_sufficient_stack;
pub use thunk::Thunk;
pub use value::{
    Closure, Func, FuncKind, Heap, Key, MapEntries, Name, NativeFn, Number, Position, Symbol,
    Value,
};
