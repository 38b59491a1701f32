//! Bridge to a host-provided native undo coordinator.
//!
//! Platforms usually offer a single system undo service that drives menu
//! items, keyboard shortcuts and gestures. Its native API only knows about
//! one pending undo step and one pending redo step at a time. This module
//! defines the contract such a service has to satisfy ([`UndoCoordinator`]),
//! the ping-pong registration protocol that maps a multi-level
//! [`History`](crate::core::History) onto it ([`Arm`]), and an in-process
//! implementation ([`InMemoryCoordinator`]).
//!
//! Histories only ever hold a [`Weak`] reference to their coordinator; its
//! lifetime belongs to the host.

mod bridge;
mod memory;

pub use bridge::Arm;
pub use memory::InMemoryCoordinator;

use crate::effects::{CheckpointAction, SubscriptionId};
use std::fmt;
use std::rc::Weak;
use std::sync::mpsc::Sender;
use uuid::Uuid;

/// Identity of the party that registered a coordinator handler.
///
/// Every [`History`](crate::core::History) gets its own target so that its
/// registrations can be revoked without touching anybody else's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TargetId(Uuid);

impl TargetId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TargetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Single-shot callback stored by a coordinator.
///
/// The coordinator passes itself back in when firing, so handlers never
/// need to keep a reference to it.
pub type UndoHandler = Box<dyn FnOnce(&dyn UndoCoordinator)>;

/// Contract of a native undo coordinator.
///
/// All methods take `&self`: coordinators are shared, host-owned services
/// and re-enter themselves from inside fired handlers.
pub trait UndoCoordinator {
    /// Open a group; nested groups fold into the outermost one.
    fn begin_grouping(&self);

    /// Close the group opened by the matching [`begin_grouping`](Self::begin_grouping).
    fn end_grouping(&self);

    /// Name the group currently being built.
    fn set_action_name(&self, name: &str);

    /// Add a single-shot handler to the group currently being built.
    ///
    /// While the coordinator is undoing, the handler lands on the redo side.
    fn register_undo(&self, target: TargetId, handler: UndoHandler);

    /// Revoke every handler registered for `target`.
    fn remove_all_actions(&self, target: TargetId);

    /// Fire the most recent undo group.
    fn undo(&self);

    /// Fire the most recent redo group.
    fn redo(&self);

    fn can_undo(&self) -> bool;

    fn can_redo(&self) -> bool;

    /// Name of the group [`undo`](Self::undo) would fire, or `""`.
    fn undo_action_name(&self) -> String;

    /// Name of the group [`redo`](Self::redo) would fire, or `""`.
    fn redo_action_name(&self) -> String;

    /// Whether the coordinator opens a group per host event on its own.
    fn groups_by_event(&self) -> bool;

    fn set_groups_by_event(&self, enabled: bool);
}

/// Live link between a history and the coordinator it is attached to.
#[derive(Clone)]
pub(crate) struct Attachment {
    pub(crate) coordinator: Weak<dyn UndoCoordinator>,
    pub(crate) subscription: SubscriptionId,
    pub(crate) sender: Sender<CheckpointAction>,
}
