//! Copy policies that decouple stored snapshots from the live value.

use std::fmt;
use std::sync::Arc;

/// Pure function producing an independent copy of a value.
///
/// Values with value semantics need no copier: `Clone` already yields an
/// independent snapshot. Values with shared interior state, such as
/// `Rc<RefCell<T>>`, clone into a second handle on the same data, so a
/// copier is needed to deep-copy them when a checkpoint is taken or
/// restored.
///
/// # Example
///
/// ```rust
/// use checkpoint_undo::core::Copier;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let deep = Copier::new(|v: &Rc<RefCell<String>>| Rc::new(RefCell::new(v.borrow().clone())));
///
/// let live = Rc::new(RefCell::new("draft".to_string()));
/// let snapshot = deep.copy(&live);
/// live.borrow_mut().push('!');
///
/// assert_eq!(*snapshot.borrow(), "draft");
/// ```
pub struct Copier<V> {
    copy: Arc<dyn Fn(&V) -> V + Send + Sync>,
}

impl<V> Copier<V> {
    /// Wrap a copy function.
    pub fn new<F>(copy: F) -> Self
    where
        F: Fn(&V) -> V + Send + Sync + 'static,
    {
        Self {
            copy: Arc::new(copy),
        }
    }

    /// Produce an independent copy of `value`.
    pub fn copy(&self, value: &V) -> V {
        (self.copy)(value)
    }
}

impl<V> Clone for Copier<V> {
    fn clone(&self) -> Self {
        Self {
            copy: Arc::clone(&self.copy),
        }
    }
}

impl<V> fmt::Debug for Copier<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Copier(..)")
    }
}
