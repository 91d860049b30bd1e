//! Lexical environment chain.
//!
//! An [`Env`] is a reference-counted frame: a binding table plus an optional
//! outer frame. Children share their parent, so closures and recursive
//! calls can keep a defining frame alive as long as they need it.
//!
//! # Lazy bindings
//!
//! A binding holds either a value or a lazy cell wrapping a [`Thunk`].
//! Reading a lazy binding hands out a handle to its cell: the first force
//! runs the thunk, concurrent readers wait for that run, and every later
//! read sees the stored result. Re-binding the name installs a new cell, so
//! a result still in flight never lands on a newer definition.
//!
//! # Teardown
//!
//! Unread lazy arguments keep their caller's frame alive, so a long tail
//! recursion leaves a long chain of frames behind. Dropping a frame queues
//! its contents on a per-thread list instead of dropping them in place,
//! which keeps teardown of any chain length flat on the native stack.

mod lazy;

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::errors::{unresolved_symbol, EvalError, EvalResult};
use crate::thunk::Thunk;
use crate::value::{Func, Name, Value};
use lazy::LazyCell;

pub use lazy::ASYNC_THREAD_NAME;

#[derive(Clone)]
enum Binding {
    Value(Value),
    Lazy(Arc<LazyCell>),
}

struct Frame {
    bindings: RwLock<FxHashMap<Name, Binding>>,
    outer: Option<Env>,
}

/// A frame in the environment chain. Cloning shares the frame.
#[derive(Clone)]
pub struct Env(Arc<Frame>);

impl Env {
    /// A frame whose lookups fall back to `outer`.
    pub fn new(outer: Option<&Env>) -> Self {
        Env(Arc::new(Frame {
            bindings: RwLock::new(FxHashMap::default()),
            outer: outer.cloned(),
        }))
    }

    /// An empty root frame.
    pub fn root() -> Self {
        Env::new(None)
    }

    /// A fresh child of this frame.
    #[must_use]
    pub fn child(&self) -> Self {
        Env::new(Some(self))
    }

    /// Frames from this one out to the root.
    fn chain(&self) -> impl Iterator<Item = &Env> {
        std::iter::successors(Some(self), |env| env.0.outer.as_ref())
    }

    /// Look `name` up, innermost frame first.
    ///
    /// A lazy binding that nobody has resolved yet comes back as an
    /// unforced [`Value::Thunk`].
    pub fn get(&self, name: &str) -> EvalResult {
        for env in self.chain() {
            let bindings = env.0.bindings.read();
            if let Some(binding) = bindings.get(name) {
                return Ok(match binding {
                    Binding::Value(value) => value.clone(),
                    Binding::Lazy(cell) => match cell.value() {
                        Some(value) => value,
                        None => Value::Thunk(cell.handle()),
                    },
                });
            }
        }
        Err(unresolved_symbol(name))
    }

    /// Whether `name` resolves anywhere in the chain.
    pub fn contains(&self, name: &str) -> bool {
        self.chain()
            .any(|env| env.0.bindings.read().contains_key(name))
    }

    /// Bind `name` in this frame, shadowing any outer binding.
    pub fn set(&self, name: impl Into<Name>, value: Value) {
        self.0
            .bindings
            .write()
            .insert(name.into(), Binding::Value(value));
    }

    /// Bind `name` in this frame to a thunk evaluated on first read.
    ///
    /// Returns a handle to the binding, the same thing a later `get` yields.
    pub fn set_lazy(&self, name: impl Into<Name>, thunk: Thunk) -> Thunk {
        let name = name.into();
        let cell = LazyCell::new(name.clone(), thunk);
        let handle = cell.handle();
        self.0.bindings.write().insert(name, Binding::Lazy(cell));
        handle
    }

    /// Start resolving the lazy binding of `name` in the background.
    ///
    /// Bindings already resolved, or already being resolved, are left alone.
    pub fn make_async(&self, name: &str) -> Result<(), EvalError> {
        let Some(owner) = self.owner_of(name) else {
            return Err(unresolved_symbol(name));
        };
        let cell = match owner.0.bindings.read().get(name) {
            Some(Binding::Lazy(cell)) => Arc::clone(cell),
            Some(Binding::Value(_)) => return Ok(()),
            None => return Err(unresolved_symbol(name)),
        };
        cell.spawn()
    }

    /// Remove the binding of `name` from the frame that owns it.
    pub fn del(&self, name: &str) -> Result<(), EvalError> {
        let Some(owner) = self.owner_of(name) else {
            return Err(unresolved_symbol(name));
        };
        owner.0.bindings.write().remove(name);
        debug!(name, "binding deleted");
        Ok(())
    }

    /// Register a host function under `name`.
    pub fn define_native<F>(&self, name: &str, f: F)
    where
        F: Fn(&[Value], &Env) -> EvalResult + Send + Sync + 'static,
    {
        self.set(name, Value::Func(Func::native(name, f)));
    }

    /// Names bound directly in this frame, sorted.
    pub fn local_names(&self) -> Vec<Name> {
        let mut names: Vec<_> = self.0.bindings.read().keys().cloned().collect();
        names.sort();
        names
    }

    fn owner_of(&self, name: &str) -> Option<&Env> {
        self.chain()
            .find(|env| env.0.bindings.read().contains_key(name))
    }
}

/// What a dropped frame owned, waiting to be released.
struct Teardown {
    _bindings: FxHashMap<Name, Binding>,
    _outer: Option<Env>,
}

thread_local! {
    /// Pending teardowns while a frame drop is in progress on this thread.
    static TEARDOWN: RefCell<Option<Vec<Teardown>>> = const { RefCell::new(None) };
}

impl Drop for Frame {
    fn drop(&mut self) {
        let teardown = Teardown {
            _bindings: std::mem::take(self.bindings.get_mut()),
            _outer: self.outer.take(),
        };
        if let Some(first) = defer(teardown) {
            drain(first);
        }
    }
}

/// Queue `teardown` behind the drop already running on this thread, or
/// hand it back when there is none.
fn defer(teardown: Teardown) -> Option<Teardown> {
    let mut teardown = Some(teardown);
    // Past thread-local destruction the teardown just drops in place.
    let _ = TEARDOWN.try_with(|queue| {
        if let Some(queue) = queue.borrow_mut().as_mut() {
            queue.extend(teardown.take());
        }
    });
    teardown
}

/// Release `first` and everything its release queues, one at a time.
fn drain(first: Teardown) {
    let owns_queue = TEARDOWN
        .try_with(|queue| *queue.borrow_mut() = Some(Vec::new()))
        .is_ok();
    drop(first);
    if !owns_queue {
        return;
    }
    while let Some(next) = TEARDOWN
        .try_with(|queue| queue.borrow_mut().as_mut().and_then(Vec::pop))
        .ok()
        .flatten()
    {
        drop(next);
    }
    let _ = TEARDOWN.try_with(|queue| queue.borrow_mut().take());
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Env")
            .field("bindings", &self.0.bindings.read().len())
            .field("depth", &self.chain().count())
            .finish()
    }
}
