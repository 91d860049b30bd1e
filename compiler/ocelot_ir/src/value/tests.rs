use pretty_assertions::assert_eq;
use rustc_hash::FxHashMap;

use super::*;
use crate::thunk::Thunk;

fn sample_map() -> Value {
    let mut entries = FxHashMap::default();
    entries.insert(Key::new("b"), Value::int(2));
    entries.insert(Key::new("a"), Value::string("x"));
    Value::map(entries)
}

#[test]
fn truthiness() {
    assert!(!Value::Nil.is_truthy());
    assert!(!Value::Bool(false).is_truthy());
    assert!(Value::Bool(true).is_truthy());
    assert!(Value::int(0).is_truthy());
    assert!(Value::string("").is_truthy());
    assert!(Value::vector(vec![]).is_truthy());
}

#[test]
fn type_names() {
    assert_eq!(Value::Nil.type_name(), "Nil");
    assert_eq!(Value::string("s").type_name(), "String");
    assert_eq!(Value::key("k").type_name(), "Key");
    assert_eq!(Value::list(vec![]).type_name(), "List");
    assert_eq!(Value::vector(vec![]).type_name(), "Vector");
    assert_eq!(sample_map().type_name(), "Map");
    assert_eq!(
        Value::Thunk(Thunk::resolved(Ok(Value::Nil))).type_name(),
        "Thunk"
    );
}

#[test]
fn structural_equality() {
    let a = Value::vector(vec![Value::int(1), Value::list(vec![Value::string("x")])]);
    let b = Value::vector(vec![Value::int(1), Value::list(vec![Value::string("x")])]);
    assert_eq!(a, b);
    assert_eq!(sample_map(), sample_map());
    assert_ne!(Value::list(vec![Value::int(1)]), Value::vector(vec![Value::int(1)]));
    assert_ne!(Value::int(1), Value::string("1"));
    assert_eq!(
        Value::number("1.50".parse::<Number>().unwrap_or_else(|_| Number::zero())),
        Value::number(Number::from_scaled(15, 1))
    );
}

#[test]
fn functions_never_equal() {
    let f = Value::Func(Func::native("id", |_, _| Ok(Value::Nil)));
    assert!(f != f.clone());
}

#[test]
fn display_forms() {
    let value = Value::list(vec![
        Value::symbol("prn"),
        Value::string("hi there"),
        Value::vector(vec![Value::int(1), Value::Bool(true), Value::Nil]),
        Value::key("k"),
    ]);
    assert_eq!(value.to_string(), "(prn hi there [1 true nil] :k)");
    assert_eq!(sample_map().to_string(), "{:a x :b 2}");
}

#[test]
fn debug_quotes_strings_and_marks_positions() {
    let value = Value::list(vec![
        Value::Symbol(Symbol::at("f", Position::new(1, 2, 1))),
        Value::symbol("g"),
        Value::string("a\"b"),
    ]);
    assert_eq!(format!("{value:?}"), r#"(f<1,2;1> g<?> "a\"b")"#);
}

#[test]
fn debug_is_depth_bounded() {
    let mut value = Value::int(7);
    for _ in 0..10 {
        value = Value::vector(vec![value]);
    }
    let rendered = format!("{value:?}");
    assert!(rendered.contains('…'));
    assert!(!rendered.contains('7'));
    assert_eq!(rendered.matches('[').count(), MAX_DEBUG_DEPTH + 1);
}

#[test]
fn quoted_wraps_in_quote_form() {
    let quoted = Value::quoted(Value::int(3));
    assert_eq!(quoted.to_string(), "(quote 3)");
}
