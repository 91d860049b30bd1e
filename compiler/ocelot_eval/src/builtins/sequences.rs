//! Collections: `count`, `empty?`, `get`, `list`, `map`, `apply`.

use ocelot_ir::errors::type_mismatch;
use ocelot_ir::{Arity, Env, EvalError, EvalResult, Func, Key, Value};

use super::args::{args, checked, eval_func, eval_one, seq};
use crate::eval::{call_form, eval, tail};

fn count_of(name: &str, form: &[Value], env: &Env) -> Result<usize, EvalError> {
    match eval_one(name, form, env)? {
        Value::List(items) | Value::Vector(items) => Ok(items.len()),
        Value::Map(entries) => Ok(entries.len()),
        other => Err(type_mismatch(name, "List, Vector or Map", other.type_name())),
    }
}

pub(super) fn count(name: &str, form: &[Value], env: &Env) -> EvalResult {
    let n = count_of(name, form, env)?;
    Ok(Value::int(i64::try_from(n).unwrap_or(i64::MAX)))
}

pub(super) fn empty_q(name: &str, form: &[Value], env: &Env) -> EvalResult {
    Ok(Value::Bool(count_of(name, form, env)? == 0))
}

/// `(get map key)`: the entry for a string or key, `nil` if absent.
pub(super) fn get(name: &str, form: &[Value], env: &Env) -> EvalResult {
    let args = checked(name, form, Arity::Exact(2))?;
    let entries = match eval(&args[0], env)? {
        Value::Map(entries) => entries,
        other => return Err(type_mismatch(name, "Map", other.type_name())),
    };
    let key = match eval(&args[1], env)? {
        Value::Key(key) => key,
        Value::Str(text) => Key::new(&*text),
        other => return Err(type_mismatch(name, "String or Key", other.type_name())),
    };
    Ok(entries.get(&key).cloned().unwrap_or(Value::Nil))
}

/// `(list x...)`: the evaluated operands as a list.
pub(super) fn list(_name: &str, form: &[Value], env: &Env) -> EvalResult {
    args(form)
        .iter()
        .map(|item| eval(item, env))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::list)
}

/// The head to put in a synthesized call: the symbol the caller wrote, so
/// backtraces name it, or the function itself for any other expression.
fn call_head(ast: &Value, func: Func) -> Value {
    match ast {
        Value::Symbol(_) => ast.clone(),
        _ => Value::Func(func),
    }
}

/// `(map f coll)`: a vector of `f` applied to each element.
pub(super) fn map(name: &str, form: &[Value], env: &Env) -> EvalResult {
    let args = checked(name, form, Arity::Exact(2))?;
    let func = eval_func(name, &args[0], env)?;
    let coll = eval(&args[1], env)?;
    let head = call_head(&args[0], func);
    let calls = seq(name, &coll)?
        .iter()
        .map(|item| call_form(head.clone(), [item.clone()]))
        .collect();
    tail(&Value::vector(calls), env)
}

/// `(apply f args)`: call `f` with the elements of `args`.
pub(super) fn apply(name: &str, form: &[Value], env: &Env) -> EvalResult {
    let args = checked(name, form, Arity::Exact(2))?;
    let func = eval_func(name, &args[0], env)?;
    let operands = eval(&args[1], env)?;
    let head = call_head(&args[0], func);
    let call = call_form(head, seq(name, &operands)?.iter().cloned());
    tail(&call, env)
}
