//! Evaluation of AST values.
//!
//! # Architecture
//!
//! Everything goes through [`eval_ast`], a single step that may hand back a
//! [`Thunk`] instead of a finished value. Two entry points sit on top:
//!
//! - [`eval`] steps and then forces, so its result is never a thunk. It is
//!   what a builtin calls for anything it needs to inspect (an `if` test, an
//!   argument to `add`).
//! - [`eval_tail`] only packages the work. Special forms and closure bodies
//!   return it from tail position, and the caller's trampoline picks it up,
//!   so tail recursion runs in a flat loop.
//!
//! Calls hand the whole unevaluated form (head included) to the callee,
//! which decides what to evaluate. A list whose head is not a function is
//! data: its elements are evaluated and collected into a vector.

use ocelot_ir::errors::parse_failure;
use ocelot_ir::{
    ensure_sufficient_stack, BacktraceFrame, Env, EvalResult, Func, FuncKind, Heap, MapEntries,
    Thunk, Value,
};
use tracing::trace;

use crate::closure;

/// Evaluate `ast` in `env` to a value that is not a thunk.
pub fn eval(ast: &Value, env: &Env) -> EvalResult {
    ensure_sufficient_stack(|| match eval_ast(ast, env)? {
        Value::Thunk(thunk) => thunk.force(),
        value => Ok(value),
    })
}

/// Suspend evaluation of `ast` in `env`.
///
/// Forcing the thunk does exactly what [`eval`] would have done.
pub fn eval_tail(ast: &Value, env: &Env) -> Thunk {
    let ast = ast.clone();
    let env = env.clone();
    Thunk::new(move || eval_ast(&ast, &env))
}

/// [`eval_tail`] wrapped as a value, the usual return of a special form.
#[inline]
pub(crate) fn tail(ast: &Value, env: &Env) -> EvalResult {
    Ok(Value::Thunk(eval_tail(ast, env)))
}

/// One evaluation step. The result may still be a thunk.
pub fn eval_ast(ast: &Value, env: &Env) -> EvalResult {
    match ast {
        Value::Nil
        | Value::Bool(_)
        | Value::Number(_)
        | Value::Str(_)
        | Value::Key(_)
        | Value::Func(_)
        | Value::Thunk(_) => Ok(ast.clone()),
        Value::Symbol(sym) => env.get(sym.as_str()),
        Value::List(items) => eval_list(items, env),
        Value::Vector(items) => items
            .iter()
            .map(|item| eval(item, env))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::vector),
        Value::Map(entries) => {
            let mut evaluated = MapEntries::default();
            for (key, value) in entries.iter() {
                evaluated.insert(key.clone(), eval(value, env)?);
            }
            Ok(Value::map(evaluated))
        }
    }
}

fn eval_list(form: &Heap<Vec<Value>>, env: &Env) -> EvalResult {
    let Some(head) = form.first() else {
        return Ok(Value::Nil);
    };
    match eval(head, env)? {
        Value::Func(func) => Ok(Value::Thunk(call(&func, head, form.clone(), env))),
        head => {
            let mut items = Vec::with_capacity(form.len());
            items.push(head);
            for item in form.iter().skip(1) {
                items.push(eval(item, env)?);
            }
            Ok(Value::vector(items))
        }
    }
}

/// Suspend a call of `func` with `form`, read from source with head `head`.
fn call(func: &Func, head: &Value, form: Heap<Vec<Value>>, env: &Env) -> Thunk {
    let env = env.clone();
    match func.kind() {
        FuncKind::Native(native) => {
            let native = native.clone();
            Thunk::new(move || native(form.as_slice(), &env))
        }
        FuncKind::Closure(user) => {
            let frame = match head {
                Value::Symbol(sym) => BacktraceFrame::new(sym.name().clone(), sym.pos()),
                _ => BacktraceFrame::new(func.name().clone(), None),
            };
            let user = user.clone();
            let name = func.name().clone();
            Thunk::traced(frame, move || closure::invoke(&user, &name, form.as_slice(), &env))
        }
    }
}

/// Parse every form of `source` and evaluate them in order.
///
/// Returns the value of the last form, or `nil` for empty input.
pub fn eval_string(source: &str, env: &Env) -> EvalResult {
    let forms = ocelot_parse::parse_all(source).map_err(|err| parse_failure(err.to_string()))?;
    trace!(forms = forms.len(), "evaluating source");
    let mut result = Value::Nil;
    for form in &forms {
        result = eval(form, env)?;
    }
    Ok(result)
}

/// Build the call form `(head arg...)` around already-evaluated arguments.
///
/// Arguments are quoted so the callee sees them unchanged.
pub fn call_form(head: Value, args: impl IntoIterator<Item = Value>) -> Value {
    let mut form = vec![head];
    form.extend(args.into_iter().map(|arg| match arg {
        // Self-evaluating already
        arg @ (Value::Nil
        | Value::Bool(_)
        | Value::Number(_)
        | Value::Str(_)
        | Value::Key(_)
        | Value::Func(_)) => arg,
        arg => Value::quoted(arg),
    }));
    Value::list(form)
}
