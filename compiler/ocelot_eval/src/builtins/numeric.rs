//! Decimal arithmetic and comparison.
//!
//! Every operand must evaluate to a `Number`. `sub` and `quot*` treat their
//! first operand as the seed when given more than one, so `(sub 5)` is `-5`
//! and `(quot* 4)` is `0.25`.

use std::cmp::Ordering;

use ocelot_ir::errors::{division_by_zero, invalid_argument};
use ocelot_ir::{Arity, Env, EvalError, EvalResult, Number, Value};

use super::args::{args, checked, eval_number};

fn numbers(name: &str, form: &[Value], env: &Env) -> Result<Vec<Number>, EvalError> {
    args(form)
        .iter()
        .map(|item| eval_number(name, item, env))
        .collect()
}

/// Fold with `seed` unless there are two or more operands, in which case
/// the first operand seeds the fold.
fn seeded_fold(
    operands: &[Number],
    seed: Number,
    mut step: impl FnMut(&Number, &Number) -> Result<Number, EvalError>,
) -> Result<Number, EvalError> {
    let (mut acc, rest) = match operands.split_first() {
        Some((first, rest)) if !rest.is_empty() => (first.clone(), rest),
        _ => (seed, operands),
    };
    for operand in rest {
        acc = step(&acc, operand)?;
    }
    Ok(acc)
}

pub(super) fn add(name: &str, form: &[Value], env: &Env) -> EvalResult {
    let sum = numbers(name, form, env)?
        .iter()
        .fold(Number::zero(), |acc, n| acc.add(n));
    Ok(Value::Number(sum))
}

pub(super) fn sub(name: &str, form: &[Value], env: &Env) -> EvalResult {
    let operands = numbers(name, form, env)?;
    seeded_fold(&operands, Number::zero(), |acc, n| Ok(acc.sub(n))).map(Value::Number)
}

pub(super) fn mul(name: &str, form: &[Value], env: &Env) -> EvalResult {
    let product = numbers(name, form, env)?
        .iter()
        .fold(Number::one(), |acc, n| acc.mul(n));
    Ok(Value::Number(product))
}

/// `(quot* a b ...)`: running default-precision division.
pub(super) fn quot_star(name: &str, form: &[Value], env: &Env) -> EvalResult {
    let operands = numbers(name, form, env)?;
    seeded_fold(&operands, Number::one(), |acc, n| {
        acc.div(n).ok_or_else(division_by_zero)
    })
    .map(Value::Number)
}

/// Evaluate `(op a b places)` into its quotient and remainder.
fn quot_rem(name: &str, form: &[Value], env: &Env) -> Result<(Number, Number), EvalError> {
    let args = checked(name, form, Arity::Exact(3))?;
    let dividend = eval_number(name, &args[0], env)?;
    let divisor = eval_number(name, &args[1], env)?;
    let places = eval_number(name, &args[2], env)?;
    if divisor.is_zero() {
        return Err(division_by_zero());
    }
    let out_of_range = || invalid_argument(name, format!("precision {places} out of range"));
    let places = places
        .trunc_i64()
        .filter(|places| places.unsigned_abs() <= Number::MAX_PLACES.unsigned_abs())
        .ok_or_else(out_of_range)?;
    dividend.quot_rem(&divisor, places).ok_or_else(out_of_range)
}

/// `(quot a b places)`: quotient truncated at `places` decimals.
pub(super) fn quot(name: &str, form: &[Value], env: &Env) -> EvalResult {
    quot_rem(name, form, env).map(|(quotient, _)| Value::Number(quotient))
}

/// `(rem a b places)`: what is left after `quot`.
pub(super) fn rem(name: &str, form: &[Value], env: &Env) -> EvalResult {
    quot_rem(name, form, env).map(|(_, remainder)| Value::Number(remainder))
}

fn compare(
    name: &str,
    form: &[Value],
    env: &Env,
    accept: impl Fn(Ordering) -> bool,
) -> EvalResult {
    let args = checked(name, form, Arity::Exact(2))?;
    let lhs = eval_number(name, &args[0], env)?;
    let rhs = eval_number(name, &args[1], env)?;
    Ok(Value::Bool(accept(lhs.cmp(&rhs))))
}

pub(super) fn lt(name: &str, form: &[Value], env: &Env) -> EvalResult {
    compare(name, form, env, Ordering::is_lt)
}

pub(super) fn lteq(name: &str, form: &[Value], env: &Env) -> EvalResult {
    compare(name, form, env, Ordering::is_le)
}

pub(super) fn gt(name: &str, form: &[Value], env: &Env) -> EvalResult {
    compare(name, form, env, Ordering::is_gt)
}

pub(super) fn gteq(name: &str, form: &[Value], env: &Env) -> EvalResult {
    compare(name, form, env, Ordering::is_ge)
}
