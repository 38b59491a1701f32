//! The action-driven state machine around [`History`](crate::core::History).
//!
//! # Key Concepts
//!
//! - **Actions**: [`CheckpointAction`] is the single entry point into a history
//! - **Effects**: reducing an action yields an [`Effect`] describing follow-up
//!   work instead of performing it
//! - **Subscriptions**: attaching a coordinator opens a [`Subscription`] that
//!   delivers the completions of coordinator-fired steps; it is cancelled by
//!   [`SubscriptionId`] on detach
//!
//! Dispatch is single-threaded and serialized by the host loop: one action
//! is reduced at a time, and subscription output re-enters as a new action.

mod action;
mod effect;
mod reducer;

pub use action::CheckpointAction;
pub use effect::{Effect, Subscription, SubscriptionId};
