//! Checkpoint history: the pure data structure at the bottom of the crate.
//!
//! This module contains:
//! - [`Checkpoint`] snapshots of the tracked value
//! - [`Copier`] copy policies for values with shared interior state
//! - [`History`], the checkpoint stack with its cursor and live value
//!
//! Nothing in here talks to a coordinator; the history operations are
//! synchronous and total.

mod checkpoint;
mod copier;
mod history;

pub use checkpoint::Checkpoint;
pub use copier::Copier;
pub use history::History;
