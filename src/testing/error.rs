//! Test store assertion failures.

use thiserror::Error;

/// Ways a [`TestStore`](super::TestStore) expectation can fail
#[derive(Debug, Error)]
pub enum TestStoreError {
    /// The state after reducing an action differs from the expected state
    #[error("State mismatch after {action}\nexpected: {expected}\n  actual: {actual}")]
    StateMismatch {
        action: String,
        expected: String,
        actual: String,
    },

    /// A different action than the expected one was pending
    #[error("Expected to receive {expected}, received {received}")]
    UnexpectedAction { expected: String, received: String },

    /// An action was expected but nothing is pending
    #[error("Expected to receive {expected}, but no action is pending")]
    NoPendingAction { expected: String },

    /// Actions were emitted but never asserted on
    #[error("Unreceived actions: {actions:?}")]
    UnhandledActions { actions: Vec<String> },
}
