//! Native stack growth for non-tail evaluation.
//!
//! Tail positions never grow the native stack: they hand a [`Thunk`] back to
//! the trampoline. Everything else (an argument to `add`, the test of an
//! `if`, a memoized lazy binding forced from inside another binding) recurses
//! natively, so its depth follows the nesting of the data rather than the
//! program's dynamic recursion. A long chain of unforced lazy arguments
//! (an accumulator threaded through a tail-recursive loop) still produces one
//! nested force per iteration when it is finally read, which is why every
//! such entry point goes through [`ensure_sufficient_stack`].
//!
//! On native targets the `stacker` crate allocates a fresh segment when the
//! remaining stack drops under the red zone. On WASM the helper is a plain
//! call.
//!
//! [`Thunk`]: crate::Thunk

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each freshly allocated segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the native stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
