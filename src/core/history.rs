//! Linear checkpoint history with a cursor.
//!
//! A [`History`] owns the live value of a tracked piece of state together
//! with an ordered stack of [`Checkpoint`]s. The cursor marks the checkpoint
//! the live value currently corresponds to:
//!
//! ```text
//! register("B"), register("C")
//! ┌──────────────────────────────────────────┐
//! │ stack:  [init, B, C]      cursor: 2      │
//! │ undo_label: C             redo_label: -  │
//! └──────────────────────────────────────────┘
//!
//! apply_undo()
//! ┌──────────────────────────────────────────┐
//! │ stack:  [init, B, C]      cursor: 1      │
//! │ undo_label: B             redo_label: C  │
//! └──────────────────────────────────────────┘
//!
//! register("D")  <-- redo tail discarded
//! ┌──────────────────────────────────────────┐
//! │ stack:  [init, B, D]      cursor: 2      │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. `stack.len() >= 1`, and `stack[0]` is never removed on its own
//! 2. `cursor < stack.len()`
//! 3. After every undo/redo the live value equals a copy of `stack[cursor].value`
//!
//! Equality and hashing only look at `(undo_label, redo_label, value)`.

use super::checkpoint::Checkpoint;
use super::copier::Copier;
use crate::coordinator::{Attachment, TargetId};
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::warn;

/// Undo/redo history of a single tracked value.
///
/// The live value is mutated directly by the owner; the change is then
/// recorded by reducing [`CheckpointAction::Register`](crate::effects::CheckpointAction::Register).
///
/// # Example
///
/// ```rust
/// use checkpoint_undo::core::History;
/// use checkpoint_undo::effects::CheckpointAction;
///
/// let mut history = History::new(String::from("A"));
///
/// history.set_value("B".to_string());
/// let _ = history.reduce(CheckpointAction::Register("Rename to B".into()));
/// assert_eq!(history.undo_label(), Some("Rename to B"));
///
/// let _ = history.reduce(CheckpointAction::AppliedUndo);
/// assert_eq!(history.value(), "A");
/// assert_eq!(history.redo_label(), Some("Rename to B"));
/// ```
pub struct History<V> {
    pub(crate) stack: Vec<Checkpoint<V>>,
    pub(crate) cursor: usize,
    pub(crate) value: V,
    pub(crate) copier: Option<Copier<V>>,
    pub(crate) target: TargetId,
    pub(crate) attachment: Option<Attachment>,
}

impl<V: Clone> History<V> {
    /// Start a history at `initial`, using `Clone` as the copy policy.
    pub fn new(initial: V) -> Self {
        Self::from_parts(initial, None)
    }

    /// Start a history at `initial` with an explicit copy policy.
    ///
    /// The copier is applied whenever a snapshot is stored and whenever a
    /// snapshot is restored into the live value.
    pub fn with_copier<F>(initial: V, copier: F) -> Self
    where
        F: Fn(&V) -> V + Send + Sync + 'static,
    {
        Self::from_parts(initial, Some(Copier::new(copier)))
    }

    pub(crate) fn from_parts(initial: V, copier: Option<Copier<V>>) -> Self {
        let snapshot = match &copier {
            Some(copier) => copier.copy(&initial),
            None => initial.clone(),
        };
        Self {
            stack: vec![Checkpoint::initial(snapshot)],
            cursor: 0,
            value: initial,
            copier,
            target: TargetId::new(),
            attachment: None,
        }
    }

    fn copy_of(&self, value: &V) -> V {
        match &self.copier {
            Some(copier) => copier.copy(value),
            None => value.clone(),
        }
    }

    /// Drop the redo tail and push a snapshot of the live value.
    pub(crate) fn register(&mut self, label: impl Into<String>) {
        self.stack.truncate(self.cursor + 1);
        let snapshot = self.copy_of(&self.value);
        self.stack.push(Checkpoint::new(snapshot, label));
        self.cursor = self.stack.len() - 1;
    }

    /// Step the cursor back and restore the live value from it.
    ///
    /// Returns `false` without touching anything when there is nothing to undo.
    pub(crate) fn apply_undo(&mut self) -> bool {
        if !self.can_undo() {
            warn!(history = %self.target, "applied undo with nothing to undo");
            return false;
        }
        self.cursor -= 1;
        self.value = self.copy_of(&self.stack[self.cursor].value);
        true
    }

    /// Step the cursor forward and restore the live value from it.
    ///
    /// Returns `false` without touching anything when there is nothing to redo.
    pub(crate) fn apply_redo(&mut self) -> bool {
        if !self.can_redo() {
            warn!(history = %self.target, "applied redo with nothing to redo");
            return false;
        }
        self.cursor += 1;
        self.value = self.copy_of(&self.stack[self.cursor].value);
        true
    }
}

impl<V> History<V> {
    /// Forget every checkpoint but the initial one.
    ///
    /// The live value is left as it is; only the ability to undo and redo
    /// is erased.
    pub(crate) fn remove_all(&mut self) {
        self.cursor = 0;
        self.stack.truncate(1);
    }

    /// The live value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Mutable access to the live value.
    ///
    /// Changes made here are not part of the history until a
    /// `Register` action is reduced.
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Replace the live value without registering a checkpoint.
    pub fn set_value(&mut self, value: V) {
        self.value = value;
    }

    /// Value of the oldest checkpoint.
    pub fn initial_value(&self) -> &V {
        &self.stack[0].value
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.stack.len()
    }

    /// Label of the change an undo would revert.
    pub fn undo_label(&self) -> Option<&str> {
        self.can_undo()
            .then(|| self.stack[self.cursor].label.as_str())
    }

    /// Label of the change a redo would reapply.
    pub fn redo_label(&self) -> Option<&str> {
        self.can_redo()
            .then(|| self.stack[self.cursor + 1].label.as_str())
    }

    /// Labels of every undoable change, oldest first.
    pub fn all_undo_labels(&self) -> Vec<&str> {
        self.stack[1..=self.cursor]
            .iter()
            .map(|c| c.label.as_str())
            .collect()
    }

    /// Labels of every redoable change, nearest first.
    pub fn all_redo_labels(&self) -> Vec<&str> {
        self.stack[self.cursor + 1..]
            .iter()
            .map(|c| c.label.as_str())
            .collect()
    }

    /// Index of the checkpoint the live value corresponds to.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Every stored checkpoint, oldest first.
    pub fn checkpoints(&self) -> &[Checkpoint<V>] {
        &self.stack
    }

    /// Identity under which this history registers coordinator handlers.
    ///
    /// Clones of a history share the same target.
    pub fn target(&self) -> TargetId {
        self.target
    }

    /// Whether a coordinator is attached and still alive.
    pub fn is_attached(&self) -> bool {
        self.attachment
            .as_ref()
            .is_some_and(|attachment| attachment.coordinator.strong_count() > 0)
    }
}

/// Cloning copies the live value through the copy policy, so a clone never
/// shares mutable state with the original. Clones keep the same target and
/// coordinator attachment.
impl<V: Clone> Clone for History<V> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            cursor: self.cursor,
            value: self.copy_of(&self.value),
            copier: self.copier.clone(),
            target: self.target,
            attachment: self.attachment.clone(),
        }
    }
}

impl<V: PartialEq> PartialEq for History<V> {
    fn eq(&self, other: &Self) -> bool {
        self.undo_label() == other.undo_label()
            && self.redo_label() == other.redo_label()
            && self.value == other.value
    }
}

impl<V: Eq> Eq for History<V> {}

impl<V: Hash> Hash for History<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.undo_label().hash(state);
        self.redo_label().hash(state);
        self.value.hash(state);
    }
}

impl<V: fmt::Debug> fmt::Debug for History<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("value", &self.value)
            .field("undo_label", &self.undo_label())
            .field("redo_label", &self.redo_label())
            .finish()
    }
}

impl<V: fmt::Display> fmt::Display for History<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::hash_map::DefaultHasher;
    use std::rc::Rc;

    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    struct Doc {
        name: String,
        number: i32,
    }

    fn doc(name: &str, number: i32) -> Doc {
        Doc {
            name: name.to_string(),
            number,
        }
    }

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn new_history_has_single_checkpoint() {
        let history = History::new(doc("A", 1));
        assert_eq!(history.checkpoints().len(), 1);
        assert_eq!(history.cursor(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo_label(), None);
        assert_eq!(history.redo_label(), None);
        assert_eq!(history.initial_value(), &doc("A", 1));
    }

    #[test]
    fn register_snapshots_live_value() {
        let mut history = History::new(doc("A", 1));
        history.value_mut().name = "B".into();
        history.register("Change Name to B");

        assert_eq!(history.cursor(), 1);
        assert_eq!(history.undo_label(), Some("Change Name to B"));
        assert_eq!(history.checkpoints()[1].value, doc("B", 1));
        assert_eq!(history.initial_value(), &doc("A", 1));
    }

    #[test]
    fn undo_and_redo_restore_snapshots() {
        let mut history = History::new(doc("A", 1));
        history.value_mut().name = "B".into();
        history.register("Change Name to B");

        assert!(history.apply_undo());
        assert_eq!(history.value(), &doc("A", 1));
        assert_eq!(history.redo_label(), Some("Change Name to B"));
        assert_eq!(history.undo_label(), None);

        assert!(history.apply_redo());
        assert_eq!(history.value(), &doc("B", 1));
        assert_eq!(history.undo_label(), Some("Change Name to B"));
        assert_eq!(history.redo_label(), None);
    }

    #[test]
    fn register_after_undo_cuts_redo_tail() {
        let mut history = History::new(0);
        for n in 1..=4 {
            history.set_value(n);
            history.register(format!("Set {n}"));
        }
        history.apply_undo();
        history.apply_undo();
        assert_eq!(history.all_redo_labels(), vec!["Set 3", "Set 4"]);

        history.set_value(10);
        history.register("Set 10");

        assert!(!history.can_redo());
        assert!(history.all_redo_labels().is_empty());
        assert_eq!(history.all_undo_labels(), vec!["Set 1", "Set 2", "Set 10"]);
    }

    #[test]
    fn infeasible_steps_change_nothing() {
        let mut history = History::new(5);
        assert!(!history.apply_undo());
        assert!(!history.apply_redo());
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.value(), &5);
        assert_eq!(history.checkpoints().len(), 1);
    }

    #[test]
    fn remove_all_keeps_live_value() {
        let mut history = History::new(doc("A", 1));
        history.value_mut().number = 2;
        history.register("Change Number to 2");
        history.value_mut().number = 3;
        history.register("Change Number to 3");
        history.apply_undo();

        history.remove_all();

        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.value(), &doc("A", 2));
        assert_eq!(history.initial_value(), &doc("A", 1));
    }

    #[test]
    fn label_lists_follow_cursor() {
        let mut history = History::new(0);
        for label in ["one", "two", "three"] {
            history.register(label);
        }
        history.apply_undo();

        assert_eq!(history.all_undo_labels(), vec!["one", "two"]);
        assert_eq!(history.all_redo_labels(), vec!["three"]);
    }

    #[test]
    fn equality_ignores_hidden_stack() {
        let mut deep = History::new(1);
        deep.register("first");
        deep.set_value(2);
        deep.register("second");

        let mut shallow = History::new(7);
        shallow.set_value(2);
        shallow.register("second");

        assert_eq!(deep, shallow);
        assert_eq!(hash_of(&deep), hash_of(&shallow));

        shallow.set_value(3);
        assert_ne!(deep, shallow);
    }

    #[test]
    fn copier_isolates_reference_values() {
        let initial = Rc::new(RefCell::new(doc("A", 1)));
        let mut history = History::with_copier(initial.clone(), |v: &Rc<RefCell<Doc>>| {
            Rc::new(RefCell::new(v.borrow().clone()))
        });

        initial.borrow_mut().name = "B".into();
        history.register("Change Name to B");
        initial.borrow_mut().name = "C".into();

        assert_eq!(history.initial_value().borrow().name, "A");
        assert_eq!(history.checkpoints()[1].value.borrow().name, "B");

        history.apply_undo();
        assert_eq!(history.value().borrow().name, "A");
        assert!(!Rc::ptr_eq(history.value(), &history.checkpoints()[0].value));
    }

    #[test]
    fn clone_copies_live_value_through_copier() {
        let history = History::with_copier(Rc::new(RefCell::new(1)), |v: &Rc<RefCell<i32>>| {
            Rc::new(RefCell::new(*v.borrow()))
        });
        let cloned = history.clone();

        *cloned.value().borrow_mut() = 2;

        assert_eq!(*history.value().borrow(), 1);
        assert_eq!(cloned.target(), history.target());
    }

    #[test]
    fn debug_shows_value_and_labels() {
        let mut history = History::new(3);
        history.register("Set 3");
        let rendered = format!("{history:?}");
        assert!(rendered.contains("value: 3"));
        assert!(rendered.contains("Set 3"));
        assert_eq!(history.to_string(), "3");
    }
}
