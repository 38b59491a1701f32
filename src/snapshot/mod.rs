//! Serialization of tracked values.
//!
//! A [`History`] serializes as its live value alone, so a host state that
//! embeds histories keeps the same wire format as one holding plain values.
//! The checkpoint stack is never persisted: decoding yields a fresh history
//! whose only checkpoint is the decoded value. Copy policies are not
//! serializable either; rebuild with
//! [`HistoryBuilder`](crate::builder::HistoryBuilder) if one is needed.

pub mod error;

pub use error::SnapshotError;

use crate::core::History;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

impl<V: Serialize> Serialize for History<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

impl<'de, V: Deserialize<'de> + Clone> Deserialize<'de> for History<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        V::deserialize(deserializer).map(History::new)
    }
}

/// Encode the live value as JSON.
pub fn to_json<V: Serialize>(history: &History<V>) -> Result<String, SnapshotError> {
    serde_json::to_string(history).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
}

/// Decode a fresh history from JSON.
pub fn from_json<V: DeserializeOwned + Clone>(json: &str) -> Result<History<V>, SnapshotError> {
    serde_json::from_str(json).map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))
}

/// Encode the live value with bincode.
pub fn to_bytes<V: Serialize>(history: &History<V>) -> Result<Vec<u8>, SnapshotError> {
    bincode::serialize(history).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
}

/// Decode a fresh history from bincode.
pub fn from_bytes<V: DeserializeOwned + Clone>(bytes: &[u8]) -> Result<History<V>, SnapshotError> {
    bincode::deserialize(bytes).map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))
}
