//! The builtin library and the root environment.
//!
//! Builtins are native functions that receive the unevaluated call form,
//! so each one decides which operands to evaluate and which to return in
//! tail position. The table is plain data; [`base_env`] registers it into a
//! fresh root frame every time, there is no process-wide registry.

mod args;
mod concurrency;
mod control;
mod define;
mod meta;
mod numeric;
mod predicates;
mod sequences;

use ocelot_ir::{Env, EvalResult, Value};

use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// A builtin receives the name it was registered under, for error messages.
type Builtin = fn(&str, &[Value], &Env) -> EvalResult;

const BUILTINS: &[(&str, Builtin)] = &[
    // control
    ("if", control::if_form),
    ("do", control::do_form),
    ("let", control::let_form),
    ("and", control::and),
    ("or", control::or),
    ("throw", control::throw),
    ("try", control::try_form),
    // definitions
    ("def!", define::def),
    ("free!", define::free),
    ("defn!", define::defn),
    ("fn*", define::lambda),
    ("func", define::lambda),
    ("catch", define::lambda),
    // numbers
    ("add", numeric::add),
    ("sub", numeric::sub),
    ("mul", numeric::mul),
    ("quot", numeric::quot),
    ("div", numeric::quot),
    ("rem", numeric::rem),
    ("quot*", numeric::quot_star),
    ("div*", numeric::quot_star),
    ("lt?", numeric::lt),
    ("lteq?", numeric::lteq),
    ("gt?", numeric::gt),
    ("gteq?", numeric::gteq),
    // predicates
    ("nil?", predicates::nil_q),
    ("null?", predicates::nil_q),
    ("true?", predicates::true_q),
    ("false?", predicates::false_q),
    ("bool", predicates::bool),
    ("not", predicates::not),
    ("type", predicates::type_of),
    ("list?", predicates::list_q),
    ("expr?", predicates::list_q),
    ("vector?", predicates::vector_q),
    ("map?", predicates::map_q),
    ("hash?", predicates::map_q),
    ("symbol?", predicates::symbol_q),
    ("string?", predicates::string_q),
    ("number?", predicates::number_q),
    ("bool?", predicates::bool_q),
    ("key?", predicates::key_q),
    ("func?", predicates::func_q),
    ("equal?", predicates::equal_q),
    // sequences
    ("count", sequences::count),
    ("empty?", sequences::empty_q),
    ("get", sequences::get),
    ("list", sequences::list),
    ("map", sequences::map),
    ("apply", sequences::apply),
    // code
    ("quote", meta::quote),
    ("eval", meta::eval_form),
    ("parse", meta::parse),
    // concurrency
    ("async", concurrency::async_form),
    ("wait", concurrency::wait),
];

/// Names of every builtin, `prn` included.
pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    BUILTINS
        .iter()
        .map(|&(name, _)| name)
        .chain(std::iter::once("prn"))
}

/// A root environment holding `nil`, `true`, `false` and every builtin,
/// with `prn` writing to stdout.
pub fn base_env() -> Env {
    base_env_with_printer(stdout_handler())
}

/// [`base_env`] with `prn` writing to `printer`.
pub fn base_env_with_printer(printer: SharedPrintHandler) -> Env {
    let env = Env::root();
    env.set("nil", Value::Nil);
    env.set("true", Value::Bool(true));
    env.set("false", Value::Bool(false));
    for &(name, builtin) in BUILTINS {
        env.define_native(name, move |form, env| builtin(name, form, env));
    }
    env.define_native("prn", move |form, env| meta::prn(&printer, form, env));
    env
}
