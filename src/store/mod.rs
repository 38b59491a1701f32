//! Routing checkpoint actions through a host application's dispatch loop.
//!
//! A host keeps one or more [`History`] values inside its own state and
//! wraps [`CheckpointAction`] in a variant of its own action type.
//! [`CheckpointRoute`] describes that embedding, [`track_checkpoints`]
//! composes the history reducer in front of the host reducer, and
//! [`Store`] runs the result: it reduces actions one at a time, interprets
//! the returned effects, and feeds subscription output back in.

pub mod macros;
mod runtime;

pub(crate) use runtime::Runtime;

use crate::core::History;
use crate::effects::{CheckpointAction, Effect};
use std::fmt;
use tracing::trace;

/// Embedding of [`CheckpointAction`] in a host action type.
///
/// Usually derived with [`checkpoint_route!`](crate::checkpoint_route).
pub trait CheckpointRoute: Sized {
    /// Wrap a checkpoint action.
    fn checkpoint(action: CheckpointAction) -> Self;

    /// The wrapped checkpoint action, if this is one.
    fn extract_checkpoint(&self) -> Option<&CheckpointAction>;
}

impl CheckpointRoute for CheckpointAction {
    fn checkpoint(action: CheckpointAction) -> Self {
        action
    }

    fn extract_checkpoint(&self) -> Option<&CheckpointAction> {
        Some(self)
    }
}

impl<A: CheckpointRoute + 'static> Effect<A> {
    /// Emit a checkpoint action from a host reducer.
    pub fn checkpoint(action: CheckpointAction) -> Self {
        Self::Send(A::checkpoint(action))
    }
}

/// Locates a history inside the host state.
pub type HistoryLens<S, V> = fn(&mut S) -> &mut History<V>;

/// Run the history at `history` before `reducer` for every action.
///
/// Checkpoint actions are reduced by the history and its effects are
/// embedded back into the host action type; every action, checkpoint or
/// not, is then handed to `reducer` as well.
///
/// # Example
///
/// ```rust
/// use checkpoint_undo::checkpoint_route;
/// use checkpoint_undo::core::History;
/// use checkpoint_undo::effects::{CheckpointAction, Effect};
/// use checkpoint_undo::store::{track_checkpoints, Store};
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum Action {
///     Set(i32),
///     Checkpoint(CheckpointAction),
/// }
/// checkpoint_route!(Action::Checkpoint);
///
/// let reducer = track_checkpoints(
///     |state: &mut History<i32>, action: Action| match action {
///         Action::Set(n) => {
///             state.set_value(n);
///             Effect::checkpoint(CheckpointAction::register(format!("Set {n}")))
///         }
///         Action::Checkpoint(_) => Effect::none(),
///     },
///     |state| state,
/// );
///
/// let mut store = Store::new(History::new(0), reducer);
/// store.send(Action::Set(5));
/// assert_eq!(store.state().undo_label(), Some("Set 5"));
///
/// store.send(Action::Checkpoint(CheckpointAction::Undo));
/// assert_eq!(store.state().value(), &0);
/// ```
pub fn track_checkpoints<S, A, V, R>(
    mut reducer: R,
    history: HistoryLens<S, V>,
) -> impl FnMut(&mut S, A) -> Effect<A>
where
    A: CheckpointRoute + Clone + 'static,
    V: Clone,
    R: FnMut(&mut S, A) -> Effect<A>,
{
    move |state: &mut S, action: A| {
        let tracked = match action.extract_checkpoint() {
            Some(checkpoint) => history(state).reduce(checkpoint.clone()).map(A::checkpoint),
            None => Effect::none(),
        };
        Effect::batch([tracked, reducer(state, action)])
    }
}

/// Synchronous dispatch loop.
///
/// `send` reduces the action, then keeps reducing queued follow-ups and
/// subscription output until nothing is pending. Coordinator steps fired
/// by the host between sends are picked up by
/// [`process_pending`](Self::process_pending).
pub struct Store<S, A> {
    state: S,
    reducer: Box<dyn FnMut(&mut S, A) -> Effect<A>>,
    runtime: Runtime<A>,
}

impl<S, A: fmt::Debug + 'static> Store<S, A> {
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

    /// Dispatch `action` and everything it leads to.
    pub fn send(&mut self, action: A) {
        self.runtime.enqueue(action);
        self.process_pending();
    }

    /// Reduce every pending action, returning how many were reduced.
    pub fn process_pending(&mut self) -> usize {
        let mut reduced = 0;
        while let Some(action) = self.runtime.next() {
            trace!(?action, "store reducing");
            let effect = (self.reducer)(&mut self.state, action);
            self.runtime.interpret(effect);
            reduced += 1;
        }
        reduced
    }

    /// Number of subscriptions currently feeding this store.
    pub fn active_subscriptions(&self) -> usize {
        self.runtime.subscription_count()
    }

    pub fn into_state(self) -> S {
        self.state
    }
}

impl<S: fmt::Debug, A> fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("subscriptions", &self.runtime.subscription_count())
            .finish()
    }
}
