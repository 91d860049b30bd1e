//! Single-flight cells behind lazy bindings.
//!
//! A cell starts out holding the binding's thunk. The first reader takes
//! the thunk and marks the cell as running on its thread; anyone else who
//! reads it meanwhile parks until the result lands. After `async`, a
//! worker thread runs the thunk and posts the result on a one-shot channel;
//! the first reader receives it instead of running the thunk itself.

use std::sync::Arc;
use std::thread::{self, ThreadId};

use crossbeam::channel::{self, Receiver};
use parking_lot::{Condvar, Mutex};
use tracing::{debug, trace};

use crate::errors::{async_failure, invalid_argument, EvalError, EvalResult};
use crate::thunk::Thunk;
use crate::value::{Name, Value};

/// Name given to background resolution threads.
pub const ASYNC_THREAD_NAME: &str = "ocelot-async";

enum LazyState {
    Pending(Thunk),
    /// A background worker is resolving the thunk; nobody has asked yet.
    Spawned {
        worker: ThreadId,
        rx: Receiver<EvalResult>,
    },
    /// `owner` is resolving the thunk, or waiting on `worker` for it.
    Running {
        owner: ThreadId,
        worker: Option<ThreadId>,
    },
    Done(EvalResult),
}

/// What the claiming reader has to do to get the result.
enum Claim {
    Run(Thunk),
    Receive(Receiver<EvalResult>),
}

pub(super) struct LazyCell {
    name: Name,
    state: Mutex<LazyState>,
    settled: Condvar,
}

impl LazyCell {
    pub(super) fn new(name: Name, thunk: Thunk) -> Arc<Self> {
        Arc::new(LazyCell {
            name,
            state: Mutex::new(LazyState::Pending(thunk)),
            settled: Condvar::new(),
        })
    }

    /// The value, once some reader has resolved it successfully.
    pub(super) fn value(&self) -> Option<Value> {
        match &*self.state.lock() {
            LazyState::Done(Ok(value)) => Some(value.clone()),
            _ => None,
        }
    }

    /// A thunk that resolves this cell when forced.
    pub(super) fn handle(self: &Arc<Self>) -> Thunk {
        let cell = Arc::clone(self);
        Thunk::new(move || cell.force())
    }

    /// Resolve the binding, running its thunk only if nobody has yet.
    pub(super) fn force(&self) -> EvalResult {
        let me = thread::current().id();
        let claim = {
            let mut state = self.state.lock();
            loop {
                let claimed = LazyState::Running {
                    owner: me,
                    worker: None,
                };
                match std::mem::replace(&mut *state, claimed) {
                    LazyState::Pending(thunk) => break Claim::Run(thunk),
                    LazyState::Spawned { worker, rx } => {
                        if worker == me {
                            *state = LazyState::Spawned { worker, rx };
                            return Err(self.self_dependent());
                        }
                        *state = LazyState::Running {
                            owner: me,
                            worker: Some(worker),
                        };
                        break Claim::Receive(rx);
                    }
                    LazyState::Running { owner, worker } => {
                        *state = LazyState::Running { owner, worker };
                        if owner == me || worker == Some(me) {
                            return Err(self.self_dependent());
                        }
                        self.settled.wait(&mut state);
                    }
                    LazyState::Done(result) => {
                        let out = result.clone();
                        *state = LazyState::Done(result);
                        return out;
                    }
                }
            }
        };

        let result = match claim {
            Claim::Run(thunk) => thunk.force(),
            Claim::Receive(rx) => rx.recv().unwrap_or_else(|_| {
                Err(async_failure("background resolution ended without a result"))
            }),
        };
        *self.state.lock() = LazyState::Done(result.clone());
        self.settled.notify_all();
        result
    }

    /// Hand a pending thunk to a background thread.
    ///
    /// The worker only sends its result down a one-shot channel; the first
    /// reader afterwards receives it and settles the cell. A cell that is
    /// already running or resolved is left alone.
    pub(super) fn spawn(&self) -> Result<(), EvalError> {
        let mut state = self.state.lock();
        let LazyState::Pending(thunk) = &*state else {
            return Ok(());
        };
        let thunk = thunk.clone();
        let (tx, rx) = channel::bounded(1);
        let worker = thread::Builder::new()
            .name(ASYNC_THREAD_NAME.to_string())
            .spawn(move || {
                if tx.send(thunk.force()).is_err() {
                    trace!("async result dropped unread");
                }
            })
            .map_err(|err| async_failure(err.to_string()))?;
        // The worker cannot look at the cell before this lock is released.
        *state = LazyState::Spawned {
            worker: worker.thread().id(),
            rx,
        };
        debug!(name = %self.name, "launched background resolution");
        Ok(())
    }

    #[cold]
    fn self_dependent(&self) -> EvalError {
        invalid_argument(self.name.as_str(), "binding depends on its own value")
    }
}
