//! Persistent builder state.
//!
//! A builder holds an `Arc` to its snapshot. Deriving a builder clones the
//! snapshot shallowly (every [`Slot`] is itself an `Arc`) and rebuilds only the
//! slot that changes, so earlier builders keep rendering exactly what they
//! rendered before.

use std::ops::Deref;
use std::sync::Arc;

/// An ordered, shared field of a builder snapshot.
#[derive(Debug)]
pub(crate) struct Slot<T>(Arc<Vec<T>>);

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Slot(Arc::clone(&self.0))
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot(Arc::new(Vec::new()))
    }
}

impl<T: Clone> Slot<T> {
    /// Replace the field wholesale.
    pub(crate) fn set(items: impl IntoIterator<Item = T>) -> Self {
        Slot(Arc::new(items.into_iter().collect()))
    }

    /// A new slot with `item` added at the end.
    pub(crate) fn appended(&self, item: T) -> Self {
        self.extended(std::iter::once(item))
    }

    /// A new slot with `items` added at the end, in order.
    pub(crate) fn extended(&self, items: impl IntoIterator<Item = T>) -> Self {
        let mut next = Vec::clone(&self.0);
        next.extend(items);
        Slot(Arc::new(next))
    }

    #[cfg(test)]
    pub(crate) fn shares_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Deref for Slot<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

/// Derive a new snapshot from `data`, changing it through `f`.
///
/// `data` itself is never touched.
pub(crate) fn derive<S: Clone>(data: &Arc<S>, f: impl FnOnce(&mut S)) -> Arc<S> {
    let mut next = S::clone(data);
    f(&mut next);
    Arc::new(next)
}
