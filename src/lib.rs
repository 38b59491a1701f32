//! Checkpoint Undo: snapshot-based undo/redo for reducer-driven state
//!
//! A [`History`] tracks one value of an application's state. The application
//! mutates the value directly and then reduces a `Register` action with a
//! human-readable label; the history stores a snapshot. `Undo` and `Redo`
//! actions restore earlier snapshots through the completion events
//! `AppliedUndo`/`AppliedRedo`.
//!
//! A history can optionally be mirrored onto a native undo coordinator (the
//! platform service behind undo menu items and shortcuts). The coordinator
//! only exposes one pending step per direction, so the history re-arms it
//! after every firing.
//!
//! # Core Concepts
//!
//! - **History**: checkpoint stack with a cursor and the live value ([`core`])
//! - **Actions & Effects**: the state machine that mutates a history ([`effects`])
//! - **Coordinator**: the native undo service contract and bridge ([`coordinator`])
//! - **Store**: routing checkpoint actions through a host dispatch loop ([`store`])
//!
//! # Example
//!
//! ```rust
//! use checkpoint_undo::{CheckpointAction, History, Store};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Doc {
//!     name: String,
//!     number: i32,
//! }
//!
//! let mut store = Store::new(
//!     History::new(Doc { name: "A".into(), number: 1 }),
//!     |history: &mut History<Doc>, action| history.reduce(action),
//! );
//!
//! store.send(CheckpointAction::register("Change Name to B"));
//! assert_eq!(store.state().undo_label(), Some("Change Name to B"));
//!
//! store.send(CheckpointAction::Undo);
//! assert_eq!(store.state().redo_label(), Some("Change Name to B"));
//! ```

pub mod builder;
pub mod coordinator;
pub mod core;
pub mod effects;
pub mod snapshot;
pub mod store;
pub mod testing;

// Re-export commonly used types
pub use crate::coordinator::{InMemoryCoordinator, UndoCoordinator};
pub use crate::core::{Checkpoint, History};
pub use crate::effects::{CheckpointAction, Effect};
pub use crate::store::{track_checkpoints, CheckpointRoute, Store};
