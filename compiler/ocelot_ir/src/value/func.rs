//! Callable values.

use std::fmt;
use std::sync::Arc;

use super::{Name, Symbol, Value};
use crate::env::Env;
use crate::errors::EvalResult;

/// Signature of a function implemented in Rust.
///
/// Receives the whole, unevaluated call form (head included) and the
/// caller's environment; argument evaluation is up to the callee.
pub type NativeFn = dyn Fn(&[Value], &Env) -> EvalResult + Send + Sync;

/// A callable value.
///
/// Functions never compare equal, not even to themselves.
#[derive(Clone)]
pub struct Func {
    name: Name,
    kind: FuncKind,
}

/// The two flavors of [`Func`].
#[derive(Clone)]
pub enum FuncKind {
    /// Builtins and host functions.
    Native(Arc<NativeFn>),
    /// User functions built by `fn*`.
    Closure(Arc<Closure>),
}

/// A user function: parameters, body and the environment it was defined in.
pub struct Closure {
    pub params: Vec<Symbol>,
    pub body: Value,
    pub env: Env,
}

impl Func {
    /// Wrap a Rust function or closure.
    pub fn native<F>(name: impl Into<Name>, f: F) -> Self
    where
        F: Fn(&[Value], &Env) -> EvalResult + Send + Sync + 'static,
    {
        Func {
            name: name.into(),
            kind: FuncKind::Native(Arc::new(f)),
        }
    }

    pub fn closure(name: impl Into<Name>, closure: Closure) -> Self {
        Func {
            name: name.into(),
            kind: FuncKind::Closure(Arc::new(closure)),
        }
    }

    #[inline]
    pub fn name(&self) -> &Name {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> &FuncKind {
        &self.kind
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "&{}", self.name)
    }
}

impl fmt::Debug for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FuncKind::Native(_) => write!(f, "&{}", self.name),
            FuncKind::Closure(closure) => {
                write!(f, "&{}(", self.name)?;
                for (i, param) in closure.params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{param}")?;
                }
                f.write_str(")")
            }
        }
    }
}
