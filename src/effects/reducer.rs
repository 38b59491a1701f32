//! The history state machine.
//!
//! | Action | Precondition | Effect on the history | Emits |
//! |---|---|---|---|
//! | `Register(l)` | - | push checkpoint, arm coordinator undo `l` | - |
//! | `Undo` | `can_undo` | coordinator `undo()` if attached | `AppliedUndo` when local |
//! | `Redo` | `can_redo` | coordinator `redo()` if attached | `AppliedRedo` when local |
//! | `RemoveAll` | - | drop all but the initial checkpoint, revoke handlers | - |
//! | `AppliedUndo` / `AppliedRedo` | - | move the cursor, restore the value | - |
//! | `AttachCoordinator(Some)` | - | detach previous, reset stack, subscribe | subscription |
//! | `AttachCoordinator(None)` / `DetachCoordinator` | attached | revoke handlers | cancellation |
//!
//! The cursor only ever moves inside `AppliedUndo`/`AppliedRedo`. With a
//! coordinator attached, `Undo`/`Redo` ask the coordinator to fire its own
//! handler, whose completion arrives through the attachment's subscription.

use super::action::CheckpointAction;
use super::effect::{Effect, Subscription, SubscriptionId};
use crate::coordinator::{Arm, Attachment, UndoCoordinator};
use crate::core::History;
use std::rc::Rc;
use std::sync::mpsc;
use tracing::{debug, trace};

impl<V: Clone> History<V> {
    /// Reduce one action, returning the work left for the dispatch loop.
    pub fn reduce(&mut self, action: CheckpointAction) -> Effect<CheckpointAction> {
        debug!(history = %self.target, ?action, "reducing checkpoint action");

        match action {
            CheckpointAction::Register(label) => {
                self.register(label.as_str());
                if let Some(attachment) = &self.attachment {
                    match attachment.coordinator.upgrade() {
                        Some(coordinator) => {
                            Arm::Undo.register(&*coordinator, self.target, &label, &attachment.sender)
                        }
                        None => trace!(history = %self.target, "coordinator gone, not arming"),
                    }
                }
                Effect::none()
            }
            CheckpointAction::Undo => {
                if !self.can_undo() {
                    trace!(history = %self.target, "nothing to undo");
                    return Effect::none();
                }
                match self.coordinator() {
                    Some(coordinator) => {
                        coordinator.undo();
                        Effect::none()
                    }
                    None => Effect::send(CheckpointAction::AppliedUndo),
                }
            }
            CheckpointAction::Redo => {
                if !self.can_redo() {
                    trace!(history = %self.target, "nothing to redo");
                    return Effect::none();
                }
                match self.coordinator() {
                    Some(coordinator) => {
                        coordinator.redo();
                        Effect::none()
                    }
                    None => Effect::send(CheckpointAction::AppliedRedo),
                }
            }
            CheckpointAction::RemoveAll => {
                self.remove_all();
                if let Some(coordinator) = self.coordinator() {
                    coordinator.remove_all_actions(self.target);
                }
                Effect::none()
            }
            CheckpointAction::AppliedUndo => {
                self.apply_undo();
                Effect::none()
            }
            CheckpointAction::AppliedRedo => {
                self.apply_redo();
                Effect::none()
            }
            CheckpointAction::AttachCoordinator(Some(coordinator)) => self.attach(coordinator),
            CheckpointAction::AttachCoordinator(None) | CheckpointAction::DetachCoordinator => {
                self.detach()
            }
        }
    }

    fn attach(&mut self, coordinator: Rc<dyn UndoCoordinator>) -> Effect<CheckpointAction> {
        let previous = self.detach();

        self.remove_all();
        coordinator.set_groups_by_event(false);

        let (sender, receiver) = mpsc::channel();
        let subscription = SubscriptionId::new();
        self.attachment = Some(Attachment {
            coordinator: Rc::downgrade(&coordinator),
            subscription,
            sender,
        });
        debug!(history = %self.target, %subscription, "coordinator attached");

        Effect::batch([
            previous,
            Effect::Subscribe(Subscription::from_receiver(subscription, receiver)),
        ])
    }

    fn detach(&mut self) -> Effect<CheckpointAction> {
        let Some(attachment) = self.attachment.take() else {
            trace!(history = %self.target, "no coordinator to detach");
            return Effect::none();
        };
        if let Some(coordinator) = attachment.coordinator.upgrade() {
            coordinator.remove_all_actions(self.target);
        }
        debug!(
            history = %self.target,
            subscription = %attachment.subscription,
            "coordinator detached"
        );
        Effect::Cancel(attachment.subscription)
    }
}

impl<V> History<V> {
    fn coordinator(&self) -> Option<Rc<dyn UndoCoordinator>> {
        let coordinator = self.attachment.as_ref()?.coordinator.upgrade();
        if coordinator.is_none() {
            trace!(history = %self.target, "coordinator already dropped");
        }
        coordinator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::InMemoryCoordinator;

    /// Reduce `action` and feed every follow-up back in, including
    /// everything the subscriptions have produced so far.
    fn run(
        history: &mut History<i32>,
        subscriptions: &mut Vec<Subscription<CheckpointAction>>,
        action: CheckpointAction,
    ) -> Vec<CheckpointAction> {
        let mut emitted = Vec::new();
        let mut pending = vec![history.reduce(action)];
        loop {
            while let Some(effect) = pending.pop() {
                match effect {
                    Effect::None => {}
                    Effect::Send(next) => {
                        emitted.push(next.clone());
                        pending.push(history.reduce(next));
                    }
                    Effect::Subscribe(subscription) => subscriptions.push(subscription),
                    Effect::Cancel(id) => subscriptions.retain(|s| s.id() != id),
                    Effect::Batch(effects) => pending.extend(effects.into_iter().rev()),
                }
            }
            let polled: Vec<_> = subscriptions.iter_mut().filter_map(|s| s.poll()).collect();
            if polled.is_empty() {
                return emitted;
            }
            for next in polled {
                emitted.push(next.clone());
                pending.push(history.reduce(next));
            }
        }
    }

    fn register(history: &mut History<i32>, value: i32, label: &str) {
        history.set_value(value);
        let _ = history.reduce(CheckpointAction::register(label));
    }

    #[test]
    fn local_undo_emits_completion() {
        let mut history = History::new(1);
        register(&mut history, 2, "Set 2");

        let effect = history.reduce(CheckpointAction::Undo);
        assert!(matches!(effect, Effect::Send(CheckpointAction::AppliedUndo)));
        assert_eq!(history.cursor(), 1);

        let _ = history.reduce(CheckpointAction::AppliedUndo);
        assert_eq!(history.value(), &1);

        let effect = history.reduce(CheckpointAction::Redo);
        assert!(matches!(effect, Effect::Send(CheckpointAction::AppliedRedo)));
    }

    #[test]
    fn infeasible_undo_redo_are_noops() {
        let mut history = History::new(1);
        for _ in 0..3 {
            assert!(history.reduce(CheckpointAction::Undo).is_none());
            assert!(history.reduce(CheckpointAction::Redo).is_none());
        }
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.value(), &1);
    }

    #[test]
    fn detach_without_coordinator_is_noop() {
        let mut history = History::new(1);
        assert!(history.reduce(CheckpointAction::DetachCoordinator).is_none());
        assert!(history
            .reduce(CheckpointAction::AttachCoordinator(None))
            .is_none());
    }

    #[test]
    fn attach_resets_stack_but_keeps_value() {
        let coordinator = Rc::new(InMemoryCoordinator::new());
        let mut history = History::new(1);
        register(&mut history, 2, "Set 2");

        let effect = history.reduce(CheckpointAction::attach(&coordinator));

        assert!(matches!(effect, Effect::Subscribe(_)));
        assert!(history.is_attached());
        assert!(!history.can_undo());
        assert_eq!(history.value(), &2);
        assert!(!coordinator.groups_by_event());
    }

    #[test]
    fn coordinator_undo_round_trips_through_subscription() {
        let coordinator = Rc::new(InMemoryCoordinator::new());
        let mut subscriptions = Vec::new();
        let mut history = History::new(1);

        run(&mut history, &mut subscriptions, CheckpointAction::attach(&coordinator));
        assert_eq!(subscriptions.len(), 1);

        history.set_value(2);
        run(&mut history, &mut subscriptions, CheckpointAction::register("Set 2"));
        assert_eq!(coordinator.undo_action_name(), "Set 2");

        let emitted = run(&mut history, &mut subscriptions, CheckpointAction::Undo);
        assert_eq!(emitted, vec![CheckpointAction::AppliedUndo]);
        assert_eq!(history.value(), &1);
        assert_eq!(coordinator.redo_action_name(), "Set 2");

        let emitted = run(&mut history, &mut subscriptions, CheckpointAction::Redo);
        assert_eq!(emitted, vec![CheckpointAction::AppliedRedo]);
        assert_eq!(history.value(), &2);
        assert!(!history.can_redo());
        assert!(!coordinator.can_redo());
    }

    #[test]
    fn detach_revokes_registrations_and_cancels() {
        let coordinator = Rc::new(InMemoryCoordinator::new());
        let mut subscriptions = Vec::new();
        let mut history = History::new(1);

        run(&mut history, &mut subscriptions, CheckpointAction::attach(&coordinator));
        history.set_value(2);
        run(&mut history, &mut subscriptions, CheckpointAction::register("Set 2"));

        run(&mut history, &mut subscriptions, CheckpointAction::DetachCoordinator);

        assert!(subscriptions.is_empty());
        assert!(!history.is_attached());
        assert!(!coordinator.can_undo());
        assert!(history.can_undo());
    }

    #[test]
    fn reattach_cancels_previous_subscription() {
        let first = Rc::new(InMemoryCoordinator::new());
        let second = Rc::new(InMemoryCoordinator::new());
        let mut subscriptions = Vec::new();
        let mut history = History::new(1);

        run(&mut history, &mut subscriptions, CheckpointAction::attach(&first));
        history.set_value(2);
        run(&mut history, &mut subscriptions, CheckpointAction::register("Set 2"));
        let first_id = subscriptions[0].id();

        run(&mut history, &mut subscriptions, CheckpointAction::attach(&second));

        assert_eq!(subscriptions.len(), 1);
        assert_ne!(subscriptions[0].id(), first_id);
        assert!(!first.can_undo());
    }

    #[test]
    fn remove_all_revokes_coordinator_steps() {
        let coordinator = Rc::new(InMemoryCoordinator::new());
        let mut subscriptions = Vec::new();
        let mut history = History::new(1);

        run(&mut history, &mut subscriptions, CheckpointAction::attach(&coordinator));
        history.set_value(2);
        run(&mut history, &mut subscriptions, CheckpointAction::register("Set 2"));
        run(&mut history, &mut subscriptions, CheckpointAction::RemoveAll);

        assert!(!coordinator.can_undo());
        assert!(!history.can_undo());
        assert_eq!(history.value(), &2);
    }

    #[test]
    fn dropped_coordinator_falls_back_to_local_path() {
        let coordinator = Rc::new(InMemoryCoordinator::new());
        let mut history = History::new(1);
        let _ = history.reduce(CheckpointAction::attach(&coordinator));
        drop(coordinator);

        register(&mut history, 2, "Set 2");
        assert!(!history.is_attached());

        let effect = history.reduce(CheckpointAction::Undo);
        assert!(matches!(effect, Effect::Send(CheckpointAction::AppliedUndo)));
    }
}
