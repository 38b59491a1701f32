//! Ping-pong registration of history steps on a coordinator.
//!
//! The coordinator holds exactly one handler per step. Firing an undo
//! handler re-arms the coordinator for redo under the same label, and
//! firing a redo handler re-arms it for undo, so an arbitrarily deep
//! history is presented one step at a time:
//!
//! ```text
//! register("B")   coordinator undo: [B]      redo: []
//! undo()          -> AppliedUndo, arm redo   undo: []   redo: [B]
//! redo()          -> AppliedRedo, arm undo   undo: [B]  redo: []
//! ```

use super::{TargetId, UndoCoordinator};
use crate::effects::CheckpointAction;
use std::sync::mpsc::Sender;
use tracing::trace;

/// Direction a coordinator handler is armed for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arm {
    Undo,
    Redo,
}

impl Arm {
    /// The direction armed after this one fires.
    pub fn opposite(self) -> Self {
        match self {
            Self::Undo => Self::Redo,
            Self::Redo => Self::Undo,
        }
    }

    /// Completion event emitted when a handler armed in this direction fires.
    pub fn completion(self) -> CheckpointAction {
        match self {
            Self::Undo => CheckpointAction::AppliedUndo,
            Self::Redo => CheckpointAction::AppliedRedo,
        }
    }

    /// Register one single-shot step named `label` on `coordinator`.
    ///
    /// When the step fires, its completion is sent through `sender` and the
    /// opposite direction is armed with the same label. A step whose
    /// subscription has been cancelled does not re-arm.
    pub(crate) fn register(
        self,
        coordinator: &dyn UndoCoordinator,
        target: TargetId,
        label: &str,
        sender: &Sender<CheckpointAction>,
    ) {
        trace!(history = %target, arm = ?self, label, "arming coordinator");

        coordinator.begin_grouping();
        let label_owned = label.to_owned();
        let sender = sender.clone();
        coordinator.register_undo(
            target,
            Box::new(move |coordinator: &dyn UndoCoordinator| {
                if sender.send(self.completion()).is_err() {
                    trace!(history = %target, "subscription cancelled, dropping stale step");
                    return;
                }
                self.opposite()
                    .register(coordinator, target, &label_owned, &sender);
            }),
        );
        coordinator.set_action_name(label);
        coordinator.end_grouping();
    }
}
