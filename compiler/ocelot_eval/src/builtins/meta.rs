//! Code as data: `quote`, `eval`, `parse`, and printing.

use ocelot_ir::errors::{parse_failure, type_mismatch};
use ocelot_ir::{Arity, Env, EvalResult, Value};

use super::args::{args, checked, eval_one};
use crate::eval::{eval, tail};
use crate::print_handler::SharedPrintHandler;

/// `(quote form)`: `form`, unevaluated.
pub(super) fn quote(name: &str, form: &[Value], _env: &Env) -> EvalResult {
    let args = checked(name, form, Arity::Exact(1))?;
    Ok(args[0].clone())
}

/// `(eval form)`: evaluate `form`, then evaluate the result in tail position.
pub(super) fn eval_form(name: &str, form: &[Value], env: &Env) -> EvalResult {
    let code = eval_one(name, form, env)?;
    tail(&code, env)
}

/// `(parse "source")`: the unevaluated first form of the source.
pub(super) fn parse(name: &str, form: &[Value], env: &Env) -> EvalResult {
    match eval_one(name, form, env)? {
        Value::Str(source) => {
            ocelot_parse::parse(&source).map_err(|err| parse_failure(err.to_string()))
        }
        other => Err(type_mismatch(name, "String", other.type_name())),
    }
}

/// `(prn x...)`: print the operands space-separated on one line.
pub(super) fn prn(printer: &SharedPrintHandler, form: &[Value], env: &Env) -> EvalResult {
    let mut line = String::new();
    for (i, item) in args(form).iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        line.push_str(&eval(item, env)?.to_string());
    }
    printer.println(&line);
    Ok(Value::Nil)
}
