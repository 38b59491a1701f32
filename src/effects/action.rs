//! Events consumed and emitted by the history state machine.

use crate::coordinator::UndoCoordinator;
use std::fmt;
use std::rc::Rc;

/// Every event a [`History`](crate::core::History) reacts to.
///
/// `Register`, `Undo`, `Redo`, `RemoveAll` and the coordinator events are
/// sent by the application. `AppliedUndo` and `AppliedRedo` are completion
/// events: the history emits them itself (directly, or through an attached
/// coordinator) and they are the only actions that move the cursor.
#[derive(Clone)]
pub enum CheckpointAction {
    /// Record the live value as a new checkpoint with this label
    Register(String),
    /// Ask for one step back
    Undo,
    /// Ask for one step forward
    Redo,
    /// Forget every checkpoint but the initial one
    RemoveAll,
    /// An undo completed; move the cursor back and restore the value
    AppliedUndo,
    /// A redo completed; move the cursor forward and restore the value
    AppliedRedo,
    /// Attach a coordinator, or detach with `None`
    AttachCoordinator(Option<Rc<dyn UndoCoordinator>>),
    /// Detach the current coordinator
    DetachCoordinator,
}

impl CheckpointAction {
    pub fn register(label: impl Into<String>) -> Self {
        Self::Register(label.into())
    }

    /// Attach `coordinator`; the history keeps only a weak reference to it.
    pub fn attach<C: UndoCoordinator + 'static>(coordinator: &Rc<C>) -> Self {
        let coordinator: Rc<dyn UndoCoordinator> = coordinator.clone();
        Self::AttachCoordinator(Some(coordinator))
    }
}

impl PartialEq for CheckpointAction {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Register(a), Self::Register(b)) => a == b,
            (Self::AttachCoordinator(Some(a)), Self::AttachCoordinator(Some(b))) => {
                Rc::ptr_eq(a, b)
            }
            (Self::AttachCoordinator(None), Self::AttachCoordinator(None)) => true,
            (Self::Undo, Self::Undo)
            | (Self::Redo, Self::Redo)
            | (Self::RemoveAll, Self::RemoveAll)
            | (Self::AppliedUndo, Self::AppliedUndo)
            | (Self::AppliedRedo, Self::AppliedRedo)
            | (Self::DetachCoordinator, Self::DetachCoordinator) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for CheckpointAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register(label) => f.debug_tuple("Register").field(label).finish(),
            Self::Undo => f.write_str("Undo"),
            Self::Redo => f.write_str("Redo"),
            Self::RemoveAll => f.write_str("RemoveAll"),
            Self::AppliedUndo => f.write_str("AppliedUndo"),
            Self::AppliedRedo => f.write_str("AppliedRedo"),
            Self::AttachCoordinator(Some(coordinator)) => {
                write!(f, "AttachCoordinator(Some({:p}))", Rc::as_ptr(coordinator))
            }
            Self::AttachCoordinator(None) => f.write_str("AttachCoordinator(None)"),
            Self::DetachCoordinator => f.write_str("DetachCoordinator"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::InMemoryCoordinator;

    #[test]
    fn attach_compares_by_identity() {
        let first = Rc::new(InMemoryCoordinator::new());
        let second = Rc::new(InMemoryCoordinator::new());

        assert_eq!(CheckpointAction::attach(&first), CheckpointAction::attach(&first));
        assert_ne!(CheckpointAction::attach(&first), CheckpointAction::attach(&second));
        assert_ne!(
            CheckpointAction::attach(&first),
            CheckpointAction::AttachCoordinator(None)
        );
    }

    #[test]
    fn register_compares_labels() {
        assert_eq!(CheckpointAction::register("A"), CheckpointAction::Register("A".into()));
        assert_ne!(CheckpointAction::register("A"), CheckpointAction::register("B"));
        assert_ne!(CheckpointAction::Undo, CheckpointAction::AppliedUndo);
    }

    #[test]
    fn debug_names_variants() {
        assert_eq!(format!("{:?}", CheckpointAction::register("X")), "Register(\"X\")");
        assert_eq!(format!("{:?}", CheckpointAction::AppliedRedo), "AppliedRedo");
    }
}
