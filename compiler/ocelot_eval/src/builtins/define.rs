//! Definitions: `def!`, `free!`, `defn!`, `fn*`.

use ocelot_ir::{Arity, Env, EvalResult, Value};
use tracing::debug;

use super::args::{checked, symbol};
use crate::closure;
use crate::eval::eval_tail;

/// `(def! sym expr)` binds `sym` lazily in the current frame.
///
/// The result is the binding's thunk, so the caller's trampoline forces it.
pub(super) fn def(name: &str, form: &[Value], env: &Env) -> EvalResult {
    let args = checked(name, form, Arity::Exact(2))?;
    let sym = symbol(name, &args[0])?;
    debug!(name = sym.as_str(), "def");
    let thunk = env.set_lazy(sym.name().clone(), eval_tail(&args[1], env));
    Ok(Value::Thunk(thunk))
}

/// `(free! sym)` removes the binding from the frame that owns it.
pub(super) fn free(name: &str, form: &[Value], env: &Env) -> EvalResult {
    let args = checked(name, form, Arity::Exact(1))?;
    let sym = symbol(name, &args[0])?;
    env.del(sym.as_str())?;
    Ok(Value::Nil)
}

/// `(defn! sym (params) body)`, shorthand for `(def! sym (fn* (params) body))`.
pub(super) fn defn(name: &str, form: &[Value], env: &Env) -> EvalResult {
    let args = checked(name, form, Arity::Exact(3))?;
    let sym = symbol(name, &args[0])?;
    let func = closure::make(name, sym.name().clone(), &args[1], &args[2], env)?;
    debug!(name = sym.as_str(), "defn");
    env.set(sym.name().clone(), Value::Func(func.clone()));
    Ok(Value::Func(func))
}

/// `(fn* (params) body)`
pub(super) fn lambda(name: &str, form: &[Value], env: &Env) -> EvalResult {
    let args = checked(name, form, Arity::Exact(2))?;
    closure::make(name, "fn*", &args[0], &args[1], env).map(Value::Func)
}
