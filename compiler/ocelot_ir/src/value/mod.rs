//! Runtime values of the Ocelot language.
//!
//! `Value` is a closed sum: the reader produces the data variants, the
//! evaluator and builtins add `Func` and `Thunk`. Heap payloads go through
//! [`Heap`] and are only built by the factory methods below, so collections
//! are shared by reference and never mutated after construction.
//!
//! # Rendering
//!
//! - `Display` is the human form used by `prn` and `throw`: strings print raw.
//! - `Debug` is the REPL form: strings are quoted, symbols carry their source
//!   position, and nesting deeper than [`MAX_DEBUG_DEPTH`] collapses to `…`
//!   so a huge structure cannot flood the terminal.
//!
//! # Equality
//!
//! Structural through lists, vectors and maps; numbers compare by decimal
//! value; functions and thunks are never equal to anything.

mod func;
mod heap;
mod number;
mod symbol;

use std::fmt;

use rustc_hash::FxHashMap;

pub use func::{Closure, Func, FuncKind, NativeFn};
pub use heap::Heap;
pub use number::Number;
pub use symbol::{Key, Name, Position, Symbol};

use crate::thunk::Thunk;

/// Nesting depth after which debug rendering elides the rest.
pub const MAX_DEBUG_DEPTH: usize = 6;

/// Map payload.
pub type MapEntries = FxHashMap<Key, Value>;

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    /// The single null value.
    Nil,
    Bool(bool),
    /// Exact decimal.
    Number(Number),
    /// Immutable text.
    Str(Heap<str>),
    /// Unevaluated name reference.
    Symbol(Symbol),
    /// Map key token.
    Key(Key),
    /// Code when evaluated as a call form, data otherwise.
    List(Heap<Vec<Value>>),
    /// Always evaluated element-wise, never a call form.
    Vector(Heap<Vec<Value>>),
    Map(Heap<MapEntries>),
    Func(Func),
    /// Suspended computation; never the final result of `eval`.
    Thunk(Thunk),
}

// Factory Methods

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Number(Number::from_i64(n))
    }

    #[inline]
    pub fn number(n: impl Into<Number>) -> Self {
        Value::Number(n.into())
    }

    #[inline]
    pub fn string(text: impl AsRef<str>) -> Self {
        Value::Str(Heap::from(text.as_ref()))
    }

    #[inline]
    pub fn symbol(name: impl Into<Name>) -> Self {
        Value::Symbol(Symbol::new(name))
    }

    #[inline]
    pub fn key(name: impl Into<Name>) -> Self {
        Value::Key(Key::new(name))
    }

    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    #[inline]
    pub fn vector(items: Vec<Value>) -> Self {
        Value::Vector(Heap::new(items))
    }

    #[inline]
    pub fn map(entries: MapEntries) -> Self {
        Value::Map(Heap::new(entries))
    }

    /// `(quote value)`, used to pass already-evaluated values through a
    /// synthesized call form.
    pub fn quoted(value: Value) -> Self {
        Value::list(vec![Value::symbol("quote"), value])
    }
}

// Inspection

impl Value {
    /// Variant name, as reported by the `type` builtin.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "Nil",
            Value::Bool(_) => "Bool",
            Value::Number(_) => "Number",
            Value::Str(_) => "String",
            Value::Symbol(_) => "Symbol",
            Value::Key(_) => "Key",
            Value::List(_) => "List",
            Value::Vector(_) => "Vector",
            Value::Map(_) => "Map",
            Value::Func(_) => "Func",
            Value::Thunk(_) => "Thunk",
        }
    }

    /// Everything except `nil` and `false` is truthy.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Value::Symbol(sym) => Some(sym),
            _ => None,
        }
    }

    /// Elements of a list or vector.
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Vector(items) => Some(items),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<Func> for Value {
    fn from(func: Func) -> Self {
        Value::Func(func)
    }
}

impl From<Thunk> for Value {
    fn from(thunk: Thunk) -> Self {
        Value::Thunk(thunk)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => **a == **b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Key(a), Value::Key(b)) => a == b,
            (Value::List(a), Value::List(b)) | (Value::Vector(a), Value::Vector(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y)
            }
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(key, value)| b.get(key).is_some_and(|other| value == other))
            }
            _ => false,
        }
    }
}

fn sorted_entries(map: &MapEntries) -> Vec<(&Key, &Value)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
}

fn write_seq(
    f: &mut fmt::Formatter<'_>,
    open: &str,
    close: &str,
    items: &[Value],
    mut item: impl FnMut(&mut fmt::Formatter<'_>, &Value) -> fmt::Result,
) -> fmt::Result {
    f.write_str(open)?;
    for (i, value) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        item(f, value)?;
    }
    f.write_str(close)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
            Value::Symbol(sym) => write!(f, "{sym}"),
            Value::Key(key) => write!(f, "{key}"),
            Value::List(items) => write_seq(f, "(", ")", items, |f, v| write!(f, "{v}")),
            Value::Vector(items) => write_seq(f, "[", "]", items, |f, v| write!(f, "{v}")),
            Value::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in sorted_entries(map).into_iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{key} {value}")?;
                }
                f.write_str("}")
            }
            Value::Func(func) => write!(f, "{func}"),
            Value::Thunk(_) => f.write_str("<thunk>"),
        }
    }
}

/// Debug rendering that stops descending at [`MAX_DEBUG_DEPTH`].
struct Bounded<'a> {
    value: &'a Value,
    depth: usize,
}

impl Bounded<'_> {
    fn child<'b>(&self, value: &'b Value) -> Bounded<'b> {
        Bounded {
            value,
            depth: self.depth + 1,
        }
    }

    fn seq(&self, f: &mut fmt::Formatter<'_>, open: &str, close: &str, items: &[Value]) -> fmt::Result {
        if self.depth >= MAX_DEBUG_DEPTH && !items.is_empty() {
            return write!(f, "{open}…{close}");
        }
        write_seq(f, open, close, items, |f, v| write!(f, "{:?}", self.child(v)))
    }
}

impl fmt::Debug for Bounded<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::Str(s) => write!(f, "{:?}", &**s),
            Value::Symbol(sym) => write!(f, "{sym:?}"),
            Value::Func(func) => write!(f, "{func:?}"),
            Value::List(items) => self.seq(f, "(", ")", items),
            Value::Vector(items) => self.seq(f, "[", "]", items),
            Value::Map(map) => {
                if self.depth >= MAX_DEBUG_DEPTH && !map.is_empty() {
                    return f.write_str("{…}");
                }
                f.write_str("{")?;
                for (i, (key, value)) in sorted_entries(map).into_iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{key} {:?}", self.child(value))?;
                }
                f.write_str("}")
            }
            other => write!(f, "{other}"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(
            &Bounded {
                value: self,
                depth: 0,
            },
            f,
        )
    }
}

#[cfg(test)]
mod tests;
