//! Builder for configuring histories.

use crate::builder::error::BuildError;
use crate::core::{Copier, History};

/// Builder for constructing a [`History`] with a fluent API.
pub struct HistoryBuilder<V> {
    initial: Option<V>,
    copier: Option<Copier<V>>,
}

impl<V: Clone> HistoryBuilder<V> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            copier: None,
        }
    }

    /// Set the initial value (required).
    pub fn initial(mut self, value: V) -> Self {
        self.initial = Some(value);
        self
    }

    /// Set the copy policy used for snapshots (optional).
    pub fn copier<F>(mut self, copy: F) -> Self
    where
        F: Fn(&V) -> V + Send + Sync + 'static,
    {
        self.copier = Some(Copier::new(copy));
        self
    }

    /// Reuse an existing copy policy (optional).
    pub fn with_copier(mut self, copier: Copier<V>) -> Self {
        self.copier = Some(copier);
        self
    }

    /// Build the history.
    /// Returns an error if the initial value is missing.
    pub fn build(self) -> Result<History<V>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialValue)?;
        Ok(History::from_parts(initial, self.copier))
    }
}

impl<V: Clone> Default for HistoryBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}
