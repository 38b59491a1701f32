//! Build errors for history configuration.

use thiserror::Error;

/// Errors that can occur when building a history.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial value not specified. Call .initial(value) before .build()")]
    MissingInitialValue,
}
