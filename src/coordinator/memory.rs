//! In-process undo coordinator.
//!
//! [`InMemoryCoordinator`] behaves like a native platform undo service:
//!
//! - handlers are collected into named groups between
//!   `begin_grouping`/`end_grouping`; nested groups fold into the outermost
//! - a fresh registration outside of undo/redo clears the redo stack
//! - handlers registered while undoing form the matching redo group, and
//!   handlers registered while redoing form the matching undo group
//! - a group fires its handlers newest first
//!
//! # Failure Modes
//!
//! Misuse is absorbed rather than reported: `end_grouping` without an open
//! group and `undo`/`redo` while a group is open are ignored with a warning.

use super::{TargetId, UndoCoordinator, UndoHandler};
use std::cell::{Cell, RefCell};
use std::fmt;
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Idle,
    Undoing,
    Redoing,
}

#[derive(Default)]
struct Group {
    name: String,
    handlers: Vec<(TargetId, UndoHandler)>,
}

impl Group {
    fn named(name: String) -> Self {
        Self {
            name,
            handlers: Vec::new(),
        }
    }
}

struct Stacks {
    undo: Vec<Group>,
    redo: Vec<Group>,
    /// Group being built, if any
    open: Option<Group>,
    nesting: usize,
    mode: Mode,
}

impl Stacks {
    fn close_open_group(&mut self) {
        let Some(group) = self.open.take() else {
            return;
        };
        if group.handlers.is_empty() {
            return;
        }
        match self.mode {
            Mode::Undoing => self.redo.push(group),
            Mode::Idle | Mode::Redoing => self.undo.push(group),
        }
    }
}

/// Single-threaded undo coordinator living entirely in memory.
///
/// # Example
///
/// ```rust
/// use checkpoint_undo::coordinator::{InMemoryCoordinator, TargetId, UndoCoordinator};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let coordinator = InMemoryCoordinator::new();
/// let fired = Rc::new(Cell::new(false));
///
/// coordinator.begin_grouping();
/// let flag = fired.clone();
/// coordinator.register_undo(TargetId::new(), Box::new(move |_: &dyn UndoCoordinator| flag.set(true)));
/// coordinator.set_action_name("Typing");
/// coordinator.end_grouping();
///
/// assert_eq!(coordinator.undo_action_name(), "Typing");
/// coordinator.undo();
/// assert!(fired.get());
/// assert!(!coordinator.can_undo());
/// ```
pub struct InMemoryCoordinator {
    stacks: RefCell<Stacks>,
    groups_by_event: Cell<bool>,
}

impl InMemoryCoordinator {
    pub fn new() -> Self {
        Self {
            stacks: RefCell::new(Stacks {
                undo: Vec::new(),
                redo: Vec::new(),
                open: None,
                nesting: 0,
                mode: Mode::Idle,
            }),
            groups_by_event: Cell::new(true),
        }
    }

    /// Number of groups waiting to be undone.
    pub fn undo_depth(&self) -> usize {
        self.stacks.borrow().undo.len()
    }

    /// Number of groups waiting to be redone.
    pub fn redo_depth(&self) -> usize {
        self.stacks.borrow().redo.len()
    }

    /// Drop every group on both stacks.
    pub fn clear(&self) {
        let mut stacks = self.stacks.borrow_mut();
        stacks.undo.clear();
        stacks.redo.clear();
    }

    fn fire(&self, direction: Mode) {
        let group = {
            let mut stacks = self.stacks.borrow_mut();
            if stacks.mode != Mode::Idle || stacks.nesting > 0 {
                warn!(?direction, "coordinator step requested while a group is open");
                return;
            }
            let popped = match direction {
                Mode::Undoing => stacks.undo.pop(),
                Mode::Redoing => stacks.redo.pop(),
                Mode::Idle => None,
            };
            let Some(group) = popped else {
                return;
            };
            stacks.mode = direction;
            stacks.nesting = 1;
            stacks.open = Some(Group::named(group.name.clone()));
            group
        };

        debug!(
            ?direction,
            name = %group.name,
            handlers = group.handlers.len(),
            "coordinator firing group"
        );
        for (_, handler) in group.handlers.into_iter().rev() {
            handler(self);
        }

        let mut stacks = self.stacks.borrow_mut();
        stacks.close_open_group();
        stacks.nesting = 0;
        stacks.mode = Mode::Idle;
    }
}

impl Default for InMemoryCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoCoordinator for InMemoryCoordinator {
    fn begin_grouping(&self) {
        let mut stacks = self.stacks.borrow_mut();
        stacks.nesting += 1;
        if stacks.nesting == 1 {
            stacks.open = Some(Group::default());
        }
    }

    fn end_grouping(&self) {
        let mut stacks = self.stacks.borrow_mut();
        match stacks.nesting {
            0 => warn!("end_grouping without matching begin_grouping"),
            1 => {
                stacks.nesting = 0;
                stacks.close_open_group();
            }
            _ => stacks.nesting -= 1,
        }
    }

    fn set_action_name(&self, name: &str) {
        let mut stacks = self.stacks.borrow_mut();
        if let Some(open) = stacks.open.as_mut() {
            open.name = name.to_owned();
        } else if let Some(top) = stacks.undo.last_mut() {
            top.name = name.to_owned();
        }
    }

    fn register_undo(&self, target: TargetId, handler: UndoHandler) {
        let mut stacks = self.stacks.borrow_mut();
        if stacks.mode == Mode::Idle {
            stacks.redo.clear();
        }
        match stacks.open.as_mut() {
            Some(open) => open.handlers.push((target, handler)),
            None => {
                let mut group = Group::default();
                group.handlers.push((target, handler));
                match stacks.mode {
                    Mode::Undoing => stacks.redo.push(group),
                    Mode::Idle | Mode::Redoing => stacks.undo.push(group),
                }
            }
        }
    }

    fn remove_all_actions(&self, target: TargetId) {
        let mut stacks = self.stacks.borrow_mut();
        let Stacks {
            undo, redo, open, ..
        } = &mut *stacks;
        for stack in [undo, redo] {
            for group in stack.iter_mut() {
                group.handlers.retain(|(owner, _)| *owner != target);
            }
            stack.retain(|group| !group.handlers.is_empty());
        }
        if let Some(open) = open.as_mut() {
            open.handlers.retain(|(owner, _)| *owner != target);
        }
    }

    fn undo(&self) {
        self.fire(Mode::Undoing);
    }

    fn redo(&self) {
        self.fire(Mode::Redoing);
    }

    fn can_undo(&self) -> bool {
        !self.stacks.borrow().undo.is_empty()
    }

    fn can_redo(&self) -> bool {
        !self.stacks.borrow().redo.is_empty()
    }

    fn undo_action_name(&self) -> String {
        self.stacks
            .borrow()
            .undo
            .last()
            .map(|group| group.name.clone())
            .unwrap_or_default()
    }

    fn redo_action_name(&self) -> String {
        self.stacks
            .borrow()
            .redo
            .last()
            .map(|group| group.name.clone())
            .unwrap_or_default()
    }

    fn groups_by_event(&self) -> bool {
        self.groups_by_event.get()
    }

    fn set_groups_by_event(&self, enabled: bool) {
        self.groups_by_event.set(enabled);
    }
}

impl fmt::Debug for InMemoryCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stacks = self.stacks.borrow();
        f.debug_struct("InMemoryCoordinator")
            .field("undo_depth", &stacks.undo.len())
            .field("redo_depth", &stacks.redo.len())
            .field("mode", &stacks.mode)
            .field("groups_by_event", &self.groups_by_event.get())
            .finish()
    }
}
