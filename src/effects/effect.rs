//! Effects returned by reducers.
//!
//! Reducers never perform host-visible work themselves; they describe it.
//! An [`Effect`] is interpreted by the dispatch loop that called the reducer:
//! follow-up actions are queued, subscriptions are kept alive until
//! cancelled, and subscription output re-enters the loop as fresh actions.

use std::fmt;
use std::sync::mpsc::Receiver;
use uuid::Uuid;

/// Key under which a long-lived subscription can later be cancelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Source of actions produced outside of any reducer call.
///
/// Polling never blocks: it returns `None` once the source has nothing
/// pending right now.
pub struct Subscription<A> {
    id: SubscriptionId,
    poll: Box<dyn FnMut() -> Option<A>>,
}

impl<A: 'static> Subscription<A> {
    pub fn new<F>(id: SubscriptionId, poll: F) -> Self
    where
        F: FnMut() -> Option<A> + 'static,
    {
        Self {
            id,
            poll: Box::new(poll),
        }
    }

    /// Drain a channel; dropping the subscription drops the receiver, after
    /// which every send on the channel fails.
    pub fn from_receiver(id: SubscriptionId, receiver: Receiver<A>) -> Self {
        Self::new(id, move || receiver.try_recv().ok())
    }

    /// Transform every action this subscription yields.
    pub fn map<B, F>(self, f: F) -> Subscription<B>
    where
        B: 'static,
        F: Fn(A) -> B + 'static,
    {
        let mut poll = self.poll;
        Subscription {
            id: self.id,
            poll: Box::new(move || poll().map(&f)),
        }
    }
}

impl<A> Subscription<A> {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Next pending action, if any.
    pub fn poll(&mut self) -> Option<A> {
        (self.poll)()
    }
}

impl<A> fmt::Debug for Subscription<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// Work a reducer asks its dispatch loop to perform.
#[must_use]
pub enum Effect<A> {
    /// Nothing to do
    None,
    /// Feed this action back into the loop right away
    Send(A),
    /// Keep polling this subscription until it is cancelled
    Subscribe(Subscription<A>),
    /// Drop the subscription with this id
    Cancel(SubscriptionId),
    /// Perform several effects in order
    Batch(Vec<Effect<A>>),
}

impl<A: 'static> Effect<A> {
    pub fn none() -> Self {
        Self::None
    }

    pub fn send(action: A) -> Self {
        Self::Send(action)
    }

    /// Combine effects, dropping the empty ones.
    pub fn batch(effects: impl IntoIterator<Item = Effect<A>>) -> Self {
        let mut effects: Vec<_> = effects.into_iter().filter(|e| !e.is_none()).collect();
        match effects.len() {
            0 => Self::None,
            1 => effects.remove(0),
            _ => Self::Batch(effects),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Embed every action this effect produces into another action type.
    pub fn map<B, F>(self, f: F) -> Effect<B>
    where
        B: 'static,
        F: Fn(A) -> B + Clone + 'static,
    {
        match self {
            Self::None => Effect::None,
            Self::Send(action) => Effect::Send(f(action)),
            Self::Subscribe(subscription) => Effect::Subscribe(subscription.map(f)),
            Self::Cancel(id) => Effect::Cancel(id),
            Self::Batch(effects) => {
                Effect::Batch(effects.into_iter().map(|e| e.map(f.clone())).collect())
            }
        }
    }
}

impl<A: fmt::Debug> fmt::Debug for Effect<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Send(action) => f.debug_tuple("Send").field(action).finish(),
            Self::Subscribe(subscription) => {
                f.debug_tuple("Subscribe").field(&subscription.id).finish()
            }
            Self::Cancel(id) => f.debug_tuple("Cancel").field(id).finish(),
            Self::Batch(effects) => f.debug_tuple("Batch").field(effects).finish(),
        }
    }
}
