//! Snapshot entries stored in a [`History`](super::History).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A frozen snapshot of the tracked value paired with the label of the
/// change that produced it.
///
/// The first checkpoint of every history holds the initial value and an
/// empty label. Checkpoints serialize on their own for hosts that export
/// history listings; a [`History`](super::History) never persists them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Checkpoint<V> {
    /// The snapshot, already passed through the history's copy policy
    pub value: V,
    /// Human-readable name of the change, shown in undo/redo menus
    pub label: String,
    /// When the change was registered
    pub registered_at: DateTime<Utc>,
}

impl<V> Checkpoint<V> {
    /// Create a checkpoint stamped with the current time.
    pub fn new(value: V, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
            registered_at: Utc::now(),
        }
    }

    /// Create the unlabeled checkpoint that anchors a history.
    pub(crate) fn initial(value: V) -> Self {
        Self::new(value, String::new())
    }
}
