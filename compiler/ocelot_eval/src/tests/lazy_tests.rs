#![expect(clippy::unwrap_used, reason = "Tests can panic")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pretty_assertions::assert_eq;

use super::{run, test_env};
use crate::{eval_string, Env, Value};

/// Register `(tick)`, which counts its calls and returns the new count.
fn with_ticker(env: &Env) -> Arc<AtomicUsize> {
    let ticks = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&ticks);
    env.define_native("tick", move |_, _| {
        let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Value::int(i64::try_from(n).unwrap_or(i64::MAX)))
    });
    ticks
}

#[test]
fn let_binding_runs_once() {
    let (env, _) = test_env();
    let ticks = with_ticker(&env);
    let result = eval_string("(let (x (add (tick) 10)) (add x x x))", &env).unwrap();
    assert_eq!(result, Value::int(33));
    assert_eq!(ticks.load(Ordering::SeqCst), 1);
}

#[test]
fn unused_binding_never_runs() {
    let (env, _) = test_env();
    let ticks = with_ticker(&env);
    let result = eval_string("(let (x (tick) y 2) y)", &env).unwrap();
    assert_eq!(result, Value::int(2));
    assert_eq!(ticks.load(Ordering::SeqCst), 0);
}

#[test]
fn failing_binding_is_harmless_when_unread() {
    assert_eq!(run(r#"(let (x (throw "never")) 1)"#), Value::int(1));
}

#[test]
fn arguments_are_lazy() {
    assert_eq!(run(r#"((fn* (a b) a) 1 (throw "unused"))"#), Value::int(1));
}

#[test]
fn argument_runs_once_however_often_read() {
    let (env, _) = test_env();
    let ticks = with_ticker(&env);
    eval_string("(defn! triple (x) (add x x x))", &env).unwrap();
    let result = eval_string("(triple (tick))", &env).unwrap();
    assert_eq!(result, Value::int(3));
    assert_eq!(ticks.load(Ordering::SeqCst), 1);
}

#[test]
fn def_forces_its_value() {
    let (env, _) = test_env();
    let ticks = with_ticker(&env);
    let result = eval_string("(def! x (tick))", &env).unwrap();
    assert_eq!(result, Value::int(1));
    assert_eq!(eval_string("(add x x)", &env).unwrap(), Value::int(2));
    assert_eq!(ticks.load(Ordering::SeqCst), 1);
}

#[test]
fn binding_sees_earlier_bindings_of_the_same_let() {
    let (env, _) = test_env();
    let ticks = with_ticker(&env);
    let source = "(let (a (tick) b (add a 1) c (mul b 2)) (add c b a))";
    // a = 1, b = 2, c = 4
    assert_eq!(eval_string(source, &env).unwrap(), Value::int(7));
    assert_eq!(ticks.load(Ordering::SeqCst), 1);
}

#[test]
fn free_removes_a_definition() {
    let (env, _) = test_env();
    eval_string("(def! x 1) (free! x)", &env).unwrap();
    let err = eval_string("x", &env).unwrap_err();
    assert_eq!(err.to_string(), "unresolved symbol: x");
}
