//! Shared immutable storage for heap-backed values.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Reference-counted, immutable payload of a heap value.
///
/// The constructor is `pub(super)`: heap values are created through the
/// factory methods on [`Value`](super::Value) only, so every collection in
/// the runtime is shared by reference and never mutated in place.
#[repr(transparent)]
pub struct Heap<T: ?Sized>(Arc<T>);

impl<T> Heap<T> {
    #[inline]
    pub(super) fn new(value: T) -> Self {
        Heap(Arc::new(value))
    }
}

impl<T: ?Sized> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Arc::clone(&self.0))
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl From<&str> for Heap<str> {
    fn from(text: &str) -> Self {
        Heap(Arc::from(text))
    }
}

impl From<String> for Heap<str> {
    fn from(text: String) -> Self {
        Heap(Arc::from(text))
    }
}
