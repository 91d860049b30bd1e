//! Argument checking and extraction shared by the builtins.

use ocelot_ir::errors::{type_mismatch, wrong_arg_count};
use ocelot_ir::{Arity, Env, EvalError, Func, Number, Symbol, Value};

use crate::eval::eval;

/// The arguments of a call form, head stripped.
#[inline]
pub(super) fn args(form: &[Value]) -> &[Value] {
    form.get(1..).unwrap_or_default()
}

/// The arguments of `form`, provided their count fits `arity`.
pub(super) fn checked<'f>(
    name: &str,
    form: &'f [Value],
    arity: Arity,
) -> Result<&'f [Value], EvalError> {
    let args = args(form);
    if arity.accepts(args.len()) {
        Ok(args)
    } else {
        Err(wrong_arg_count(name, arity, args.len()))
    }
}

/// Evaluate the single argument of `form`.
pub(super) fn eval_one(name: &str, form: &[Value], env: &Env) -> Result<Value, EvalError> {
    let [arg] = checked(name, form, Arity::Exact(1))? else {
        return Err(wrong_arg_count(name, Arity::Exact(1), args(form).len()));
    };
    eval(arg, env)
}

pub(super) fn eval_number(name: &str, ast: &Value, env: &Env) -> Result<Number, EvalError> {
    match eval(ast, env)? {
        Value::Number(n) => Ok(n),
        other => Err(type_mismatch(name, "Number", other.type_name())),
    }
}

pub(super) fn eval_func(name: &str, ast: &Value, env: &Env) -> Result<Func, EvalError> {
    match eval(ast, env)? {
        Value::Func(func) => Ok(func),
        other => Err(type_mismatch(name, "Func", other.type_name())),
    }
}

/// An unevaluated argument that must be a symbol.
pub(super) fn symbol<'a>(name: &str, ast: &'a Value) -> Result<&'a Symbol, EvalError> {
    ast.as_symbol()
        .ok_or_else(|| type_mismatch(name, "Symbol", ast.type_name()))
}

/// Elements of an evaluated list or vector.
pub(super) fn seq<'a>(name: &str, value: &'a Value) -> Result<&'a [Value], EvalError> {
    value
        .as_seq()
        .ok_or_else(|| type_mismatch(name, "List or Vector", value.type_name()))
}
