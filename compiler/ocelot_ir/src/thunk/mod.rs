//! Suspended computations and the trampoline that resolves them.
//!
//! A [`Thunk`] is a zero-argument step returning an [`EvalResult`]. A step
//! may itself produce another thunk; [`Thunk::force`] keeps calling until a
//! plain value or an error comes out. That loop is iterative, so a chain of
//! tail calls of any length runs in constant native stack.
//!
//! Thunks built for closure calls carry a [`BacktraceFrame`]. While the
//! trampoline runs, the most recent traced frame is the logical caller;
//! a later traced thunk replaces it, which is what makes a tail call drop
//! its caller from the trace.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::errors::{BacktraceFrame, EvalResult};
use crate::value::Value;

type Step = dyn Fn() -> EvalResult + Send + Sync;

/// A deferred computation. Cheap to clone; clones share the step.
#[derive(Clone)]
pub struct Thunk {
    step: Arc<Step>,
    frame: Option<Arc<BacktraceFrame>>,
}

impl Thunk {
    pub fn new<F>(step: F) -> Self
    where
        F: Fn() -> EvalResult + Send + Sync + 'static,
    {
        Thunk {
            step: Arc::new(step),
            frame: None,
        }
    }

    /// A thunk whose failures are attributed to `frame`.
    pub fn traced<F>(frame: BacktraceFrame, step: F) -> Self
    where
        F: Fn() -> EvalResult + Send + Sync + 'static,
    {
        Thunk {
            step: Arc::new(step),
            frame: Some(Arc::new(frame)),
        }
    }

    /// A thunk that always yields `result`.
    pub fn resolved(result: EvalResult) -> Self {
        Thunk::new(move || result.clone())
    }

    /// Step until the result is no longer a thunk.
    pub fn force(&self) -> EvalResult {
        let mut current = self.clone();
        let mut frame = None;
        let mut bounces: usize = 0;
        loop {
            if let Some(traced) = &current.frame {
                frame = Some(Arc::clone(traced));
            }
            match (current.step)() {
                Ok(Value::Thunk(next)) => {
                    current = next;
                    bounces += 1;
                }
                Ok(value) => {
                    if bounces > 0 {
                        trace!(bounces, "trampoline settled");
                    }
                    return Ok(value);
                }
                Err(err) => {
                    return Err(match frame {
                        Some(frame) => err.with_frame(BacktraceFrame::clone(&frame)),
                        None => err,
                    });
                }
            }
        }
    }
}

impl fmt::Debug for Thunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.frame {
            Some(frame) => write!(f, "<thunk {}>", frame.name),
            None => f.write_str("<thunk>"),
        }
    }
}
