//! Truthiness, type inspection and equality.

use ocelot_ir::{Arity, Env, EvalResult, Value};

use super::args::{args, checked, eval_one};
use crate::eval::eval;

pub(super) fn nil_q(name: &str, form: &[Value], env: &Env) -> EvalResult {
    Ok(Value::Bool(eval_one(name, form, env)?.is_nil()))
}

pub(super) fn true_q(name: &str, form: &[Value], env: &Env) -> EvalResult {
    Ok(Value::Bool(matches!(
        eval_one(name, form, env)?,
        Value::Bool(true)
    )))
}

pub(super) fn false_q(name: &str, form: &[Value], env: &Env) -> EvalResult {
    Ok(Value::Bool(matches!(
        eval_one(name, form, env)?,
        Value::Bool(false)
    )))
}

/// `(bool x)`: truthiness as a `Bool`.
pub(super) fn bool(name: &str, form: &[Value], env: &Env) -> EvalResult {
    Ok(Value::Bool(eval_one(name, form, env)?.is_truthy()))
}

pub(super) fn not(name: &str, form: &[Value], env: &Env) -> EvalResult {
    Ok(Value::Bool(!eval_one(name, form, env)?.is_truthy()))
}

/// `(type x)`: the variant name as a string.
pub(super) fn type_of(name: &str, form: &[Value], env: &Env) -> EvalResult {
    Ok(Value::string(eval_one(name, form, env)?.type_name()))
}

/// A `*?` predicate that holds for values whose type name is `type_name`.
macro_rules! type_predicate {
    ($($fn_name:ident => $type_name:literal),* $(,)?) => {
        $(
            pub(super) fn $fn_name(name: &str, form: &[Value], env: &Env) -> EvalResult {
                Ok(Value::Bool(eval_one(name, form, env)?.type_name() == $type_name))
            }
        )*
    };
}

type_predicate! {
    list_q => "List",
    vector_q => "Vector",
    map_q => "Map",
    symbol_q => "Symbol",
    string_q => "String",
    number_q => "Number",
    bool_q => "Bool",
    key_q => "Key",
    func_q => "Func",
}

/// `(equal? a b ...)`: every operand structurally equal to the first.
pub(super) fn equal_q(name: &str, form: &[Value], env: &Env) -> EvalResult {
    checked(name, form, Arity::AtLeast(2))?;
    let mut operands = args(form).iter();
    let Some(first) = operands.next() else {
        return Ok(Value::Bool(true));
    };
    let first = eval(first, env)?;
    for item in operands {
        if eval(item, env)? != first {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}
