//! Control forms: `if`, `do`, `let`, `and`, `or`, `throw`, `try`.
//!
//! Whatever ends up in tail position is returned unevaluated via `tail`, so
//! loops written as tail recursion through these forms stay flat.

use ocelot_ir::errors::{invalid_argument, type_mismatch, user_thrown};
use ocelot_ir::{Arity, Env, EvalResult, Value};
use tracing::debug;

use super::args::{args, checked, eval_one, symbol};
use crate::eval::{call_form, eval, eval_tail, tail};

/// `(if test then else?)`; a false test without else yields `nil`.
pub(super) fn if_form(name: &str, form: &[Value], env: &Env) -> EvalResult {
    let args = checked(name, form, Arity::Range(2, 3))?;
    if eval(&args[0], env)?.is_truthy() {
        tail(&args[1], env)
    } else {
        match args.get(2) {
            Some(otherwise) => tail(otherwise, env),
            None => Ok(Value::Nil),
        }
    }
}

/// `(do form...)`
pub(super) fn do_form(_name: &str, form: &[Value], env: &Env) -> EvalResult {
    let Some((last, init)) = args(form).split_last() else {
        return Ok(Value::Nil);
    };
    for item in init {
        eval(item, env)?;
    }
    tail(last, env)
}

/// `(let (sym expr ...) body)`
///
/// Each expression is bound lazily in the new frame, so later bindings can
/// read earlier ones and unused ones never run.
pub(super) fn let_form(name: &str, form: &[Value], env: &Env) -> EvalResult {
    let args = checked(name, form, Arity::Exact(2))?;
    let Some(bindings) = args[0].as_seq() else {
        return Err(type_mismatch(name, "List or Vector", args[0].type_name()));
    };
    if bindings.len() % 2 != 0 {
        return Err(invalid_argument(name, "binding missing a value"));
    }
    let local = env.child();
    for pair in bindings.chunks_exact(2) {
        let sym = symbol(name, &pair[0])?;
        local.set_lazy(sym.name().clone(), eval_tail(&pair[1], &local));
    }
    tail(&args[1], &local)
}

/// `(and x...)`: the first falsy operand, else the last one.
pub(super) fn and(_name: &str, form: &[Value], env: &Env) -> EvalResult {
    let Some((last, init)) = args(form).split_last() else {
        return Ok(Value::Bool(true));
    };
    for item in init {
        let value = eval(item, env)?;
        if !value.is_truthy() {
            return Ok(value);
        }
    }
    tail(last, env)
}

/// `(or x...)`: the first truthy operand, else the last one.
pub(super) fn or(_name: &str, form: &[Value], env: &Env) -> EvalResult {
    let Some((last, init)) = args(form).split_last() else {
        return Ok(Value::Bool(false));
    };
    for item in init {
        let value = eval(item, env)?;
        if value.is_truthy() {
            return Ok(value);
        }
    }
    tail(last, env)
}

/// `(throw value)` fails with the value's text.
pub(super) fn throw(name: &str, form: &[Value], env: &Env) -> EvalResult {
    let value = eval_one(name, form, env)?;
    Err(user_thrown(value.to_string()))
}

/// `(try expr handler)`
///
/// When `expr` fails, `handler` is evaluated and called with the error
/// message. If evaluating the handler fails too, the original error wins.
pub(super) fn try_form(name: &str, form: &[Value], env: &Env) -> EvalResult {
    let args = checked(name, form, Arity::Exact(2))?;
    let err = match eval(&args[0], env) {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };
    let Ok(handler) = eval(&args[1], env) else {
        return Err(err);
    };
    let Value::Func(handler) = handler else {
        return Err(type_mismatch(name, "Func", handler.type_name()));
    };
    debug!(error = %err.message, "caught");
    tail(
        &call_form(Value::Func(handler), [Value::string(&err.message)]),
        env,
    )
}
