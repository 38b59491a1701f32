//! Effect interpreter shared by [`Store`](super::Store) and
//! [`TestStore`](crate::testing::TestStore).

use crate::effects::{Effect, Subscription};
use std::collections::VecDeque;
use tracing::trace;

/// Queue of follow-up actions plus the live subscriptions feeding it.
pub(crate) struct Runtime<A> {
    queue: VecDeque<A>,
    subscriptions: Vec<Subscription<A>>,
}

impl<A> Runtime<A> {
    pub(crate) fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            subscriptions: Vec::new(),
        }
    }

    pub(crate) fn enqueue(&mut self, action: A) {
        self.queue.push_back(action);
    }

    pub(crate) fn interpret(&mut self, effect: Effect<A>) {
        match effect {
            Effect::None => {}
            Effect::Send(action) => self.queue.push_back(action),
            Effect::Subscribe(subscription) => {
                trace!(subscription = %subscription.id(), "subscription started");
                self.subscriptions.push(subscription);
            }
            Effect::Cancel(id) => {
                trace!(subscription = %id, "subscription cancelled");
                self.subscriptions.retain(|s| s.id() != id);
            }
            Effect::Batch(effects) => {
                for effect in effects {
                    self.interpret(effect);
                }
            }
        }
    }

    /// Move everything the subscriptions have produced into the queue.
    pub(crate) fn poll(&mut self) {
        for subscription in &mut self.subscriptions {
            while let Some(action) = subscription.poll() {
                self.queue.push_back(action);
            }
        }
    }

    /// Next action to reduce, polling subscriptions once the queue is empty.
    pub(crate) fn next(&mut self) -> Option<A> {
        if self.queue.is_empty() {
            self.poll();
        }
        self.queue.pop_front()
    }

    pub(crate) fn drain(&mut self) -> Vec<A> {
        self.poll();
        self.queue.drain(..).collect()
    }

    pub(crate) fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }
}
