//! `async` and `wait`.

use std::time::Duration;

use ocelot_ir::errors::{invalid_argument, type_mismatch};
use ocelot_ir::{Arity, Env, EvalResult, Value};

use super::args::{checked, eval_number, symbol};

/// `(async sym)` or `(async [sym...])`: start resolving lazy bindings on
/// background threads. The symbols are not evaluated.
pub(super) fn async_form(name: &str, form: &[Value], env: &Env) -> EvalResult {
    let args = checked(name, form, Arity::Exact(1))?;
    match &args[0] {
        Value::Symbol(sym) => env.make_async(sym.as_str())?,
        Value::Vector(items) | Value::List(items) => {
            for item in items.iter() {
                env.make_async(symbol(name, item)?.as_str())?;
            }
        }
        other => return Err(type_mismatch(name, "Symbol or Vector", other.type_name())),
    }
    Ok(Value::Nil)
}

/// `(wait seconds)`: block the current evaluation.
pub(super) fn wait(name: &str, form: &[Value], env: &Env) -> EvalResult {
    let args = checked(name, form, Arity::Exact(1))?;
    let seconds = eval_number(name, &args[0], env)?;
    let duration = seconds
        .to_f64()
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .ok_or_else(|| invalid_argument(name, format!("cannot wait {seconds} seconds")))?;
    std::thread::sleep(duration);
    Ok(Value::Nil)
}
