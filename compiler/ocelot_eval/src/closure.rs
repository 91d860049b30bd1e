//! User-defined functions.
//!
//! A closure captures the frame it was defined in. Each call gets one new
//! child of that frame; every parameter is bound lazily to its argument
//! expression, evaluated in the caller's frame on first read.

use ocelot_ir::errors::{type_mismatch, wrong_arg_count};
use ocelot_ir::{Arity, Closure, Env, EvalError, EvalResult, Func, Name, Symbol, Value};

use crate::eval::{eval_tail, tail};

/// Build a closure from a parameter list form and a body.
///
/// `params` must be a list or vector of symbols.
pub(crate) fn make(
    builtin: &str,
    name: impl Into<Name>,
    params: &Value,
    body: &Value,
    env: &Env,
) -> Result<Func, EvalError> {
    let Some(items) = params.as_seq() else {
        return Err(type_mismatch(builtin, "parameter list", params.type_name()));
    };
    let params = items
        .iter()
        .map(|item| match item {
            Value::Symbol(sym) => Ok(sym.clone()),
            other => Err(type_mismatch(builtin, "Symbol parameter", other.type_name())),
        })
        .collect::<Result<Vec<Symbol>, _>>()?;
    Ok(Func::closure(
        name,
        Closure {
            params,
            body: body.clone(),
            env: env.clone(),
        },
    ))
}

/// One call of `closure` with the call form `form` from `caller`.
///
/// Returns the body as a thunk so the call stays in tail position.
pub(crate) fn invoke(closure: &Closure, name: &Name, form: &[Value], caller: &Env) -> EvalResult {
    let args = form.get(1..).unwrap_or_default();
    if args.len() != closure.params.len() {
        return Err(wrong_arg_count(
            name.as_str(),
            Arity::Exact(closure.params.len()),
            args.len(),
        ));
    }
    let local = closure.env.child();
    for (param, arg) in closure.params.iter().zip(args) {
        local.set_lazy(param.name().clone(), eval_tail(arg, caller));
    }
    tail(&closure.body, &local)
}
