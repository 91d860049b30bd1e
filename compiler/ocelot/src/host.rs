//! Host functions: native code registered into the environment the same way
//! the builtins are.
//!
//! - `(now)`: Unix time in seconds, with millisecond precision
//! - `(getenv "NAME")`: an environment variable, or `nil` when unset

use std::time::{SystemTime, UNIX_EPOCH};

use ocelot_eval::{eval, Env, EvalError, EvalResult, Value};
use ocelot_ir::errors::{invalid_argument, type_mismatch, wrong_arg_count};
use ocelot_ir::{Arity, Number};

/// Register every host function into `env`.
pub fn install(env: &Env) {
    env.define_native("now", now);
    env.define_native("getenv", getenv);
}

fn operands<'f>(name: &str, form: &'f [Value], arity: Arity) -> Result<&'f [Value], EvalError> {
    let args = form.get(1..).unwrap_or_default();
    if arity.accepts(args.len()) {
        Ok(args)
    } else {
        Err(wrong_arg_count(name, arity, args.len()))
    }
}

fn now(form: &[Value], _env: &Env) -> EvalResult {
    operands("now", form, Arity::Exact(0))?;
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| invalid_argument("now", format!("system clock before epoch: {err}")))?;
    let millis = i64::try_from(elapsed.as_millis())
        .map_err(|_| invalid_argument("now", "system clock out of range"))?;
    Ok(Value::Number(Number::from_scaled(millis, 3)))
}

fn getenv(form: &[Value], env: &Env) -> EvalResult {
    let args = operands("getenv", form, Arity::Exact(1))?;
    match eval(&args[0], env)? {
        Value::Str(name) => Ok(std::env::var(&*name).map_or(Value::Nil, Value::string)),
        other => Err(type_mismatch("getenv", "String", other.type_name())),
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used, reason = "Tests can panic")]

    use ocelot_eval::{eval_string, EvalErrorKind};
    use pretty_assertions::assert_eq;

    use super::*;

    fn host_env() -> Env {
        let env = ocelot_eval::base_env_with_printer(ocelot_eval::buffer_handler());
        install(&env);
        env
    }

    #[test]
    fn now_is_recent_unix_seconds() {
        let env = host_env();
        let Value::Number(now) = eval_string("(now)", &env).unwrap() else {
            panic!("now should return a number");
        };
        // 2020-01-01T00:00:00Z
        assert!(now.trunc_i64().unwrap() > 1_577_836_800);
    }

    #[test]
    fn now_takes_no_arguments() {
        let env = host_env();
        let err = eval_string("(now 1)", &env).unwrap_err();
        assert_eq!(err.message, "now: wanted 0 args, got 1");
    }

    #[test]
    fn getenv_reads_variables() {
        let env = host_env();
        let path = eval_string(r#"(getenv "PATH")"#, &env).unwrap();
        assert_eq!(path.type_name(), "String");
        let missing = eval_string(r#"(getenv "OCELOT_SURELY_UNSET_VARIABLE")"#, &env).unwrap();
        assert_eq!(missing, Value::Nil);
    }

    #[test]
    fn getenv_wants_a_string() {
        let env = host_env();
        let err = eval_string("(getenv :path)", &env).unwrap_err();
        assert!(matches!(err.kind, EvalErrorKind::TypeMismatch { .. }));
    }
}
