//! Exhaustive test driver for reducers that track checkpoints.
//!
//! [`TestStore`] reduces one action at a time and compares the resulting
//! state with an expected state computed from the previous one. Follow-up
//! actions, including completions delivered by a coordinator, are never
//! processed on their own: each one has to be asserted with
//! [`receive`](TestStore::receive).
//!
//! The checkpoint variants ([`send_checkpoint`](TestStore::send_checkpoint),
//! [`receive_checkpoint`](TestStore::receive_checkpoint)) also apply the
//! checkpoint action's expected effect on the history, so tests only spell
//! out the change to the live value.

mod error;

pub use error::TestStoreError;

use crate::core::History;
use crate::effects::{CheckpointAction, Effect};
use crate::store::{CheckpointRoute, HistoryLens, Runtime};
use std::fmt;

impl<V: Clone> History<V> {
    /// Apply the expected outcome of `action` without any coordinator work.
    ///
    /// `Register`, `RemoveAll`, `AppliedUndo`, `AppliedRedo` and attaching a
    /// coordinator change the history; every other action leaves it alone.
    pub fn apply_for_test(&mut self, action: &CheckpointAction) {
        match action {
            CheckpointAction::Register(label) => self.register(label.as_str()),
            CheckpointAction::RemoveAll | CheckpointAction::AttachCoordinator(Some(_)) => {
                self.remove_all()
            }
            CheckpointAction::AppliedUndo => {
                self.apply_undo();
            }
            CheckpointAction::AppliedRedo => {
                self.apply_redo();
            }
            CheckpointAction::Undo
            | CheckpointAction::Redo
            | CheckpointAction::AttachCoordinator(None)
            | CheckpointAction::DetachCoordinator => {}
        }
    }
}

/// Store that checks every state change and every emitted action.
pub struct TestStore<S, A> {
    state: S,
    reducer: Box<dyn FnMut(&mut S, A) -> Effect<A>>,
    runtime: Runtime<A>,
}

impl<S, A> TestStore<S, A>
where
    S: Clone + PartialEq + fmt::Debug,
    A: PartialEq + fmt::Debug + 'static,
{
    pub fn new<R>(state: S, reducer: R) -> Self
    where
        R: FnMut(&mut S, A) -> Effect<A> + 'static,
    {
        Self {
            state,
            reducer: Box::new(reducer),
            runtime: Runtime::new(),
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Send `action`; `update` turns the previous state into the expected one.
    pub fn send(
        &mut self,
        action: A,
        update: impl FnOnce(&mut S),
    ) -> Result<(), TestStoreError> {
        self.finish()?;
        self.reduce(action, update)
    }

    /// Take the next emitted action, which must equal `expected`.
    pub fn receive(
        &mut self,
        expected: A,
        update: impl FnOnce(&mut S),
    ) -> Result<(), TestStoreError> {
        let Some(received) = self.runtime.next() else {
            return Err(TestStoreError::NoPendingAction {
                expected: format!("{expected:?}"),
            });
        };
        if received != expected {
            return Err(TestStoreError::UnexpectedAction {
                expected: format!("{expected:?}"),
                received: format!("{received:?}"),
            });
        }
        self.reduce(received, update)
    }

    /// Fail if any emitted action has not been received yet.
    pub fn finish(&mut self) -> Result<(), TestStoreError> {
        let unhandled = self.runtime.drain();
        if unhandled.is_empty() {
            return Ok(());
        }
        Err(TestStoreError::UnhandledActions {
            actions: unhandled.iter().map(|a| format!("{a:?}")).collect(),
        })
    }

    fn reduce(&mut self, action: A, update: impl FnOnce(&mut S)) -> Result<(), TestStoreError> {
        let mut expected = self.state.clone();
        update(&mut expected);

        let description = format!("{action:?}");
        let effect = (self.reducer)(&mut self.state, action);
        self.runtime.interpret(effect);

        if expected != self.state {
            return Err(TestStoreError::StateMismatch {
                action: description,
                expected: format!("{expected:?}"),
                actual: format!("{:?}", self.state),
            });
        }
        Ok(())
    }
}

impl<S, A> TestStore<S, A>
where
    S: Clone + PartialEq + fmt::Debug,
    A: CheckpointRoute + PartialEq + fmt::Debug + 'static,
{
    /// Send a checkpoint action to the history at `history`.
    pub fn send_checkpoint<V: Clone>(
        &mut self,
        action: CheckpointAction,
        history: HistoryLens<S, V>,
        update: impl FnOnce(&mut S),
    ) -> Result<(), TestStoreError> {
        let expected = action.clone();
        self.send(A::checkpoint(action), move |state| {
            update(state);
            history(state).apply_for_test(&expected);
        })
    }

    /// Receive a checkpoint action addressed to the history at `history`.
    pub fn receive_checkpoint<V: Clone>(
        &mut self,
        action: CheckpointAction,
        history: HistoryLens<S, V>,
        update: impl FnOnce(&mut S),
    ) -> Result<(), TestStoreError> {
        let expected = action.clone();
        self.receive(A::checkpoint(action), move |state| {
            update(state);
            history(state).apply_for_test(&expected);
        })
    }
}

impl<S: fmt::Debug, A> fmt::Debug for TestStore<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestStore")
            .field("state", &self.state)
            .field("subscriptions", &self.runtime.subscription_count())
            .finish()
    }
}
