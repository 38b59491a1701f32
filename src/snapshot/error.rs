//! Snapshot error types.

use thiserror::Error;

/// Errors that can occur while encoding or decoding a history's live value
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),
}
