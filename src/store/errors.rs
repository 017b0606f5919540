//! Record Store errors

use thiserror::Error;

use crate::storage::StorageError;
use crate::workout::{ValidationError, WorkoutId};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Input failed a field constraint; nothing was persisted
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Referenced workout does not exist
    #[error("Workout not found: {0}")]
    NotFound(WorkoutId),

    /// Underlying persistence failure
    #[error("Storage fault: {0}")]
    Storage(#[from] StorageError),

    /// Any other unexpected failure inside the store
    #[error("Store fault: {0}")]
    Internal(String),
}

impl StoreError {
    /// Faults are failures the caller cannot fix by changing its input.
    pub fn is_fault(&self) -> bool {
        matches!(self, StoreError::Storage(_) | StoreError::Internal(_))
    }

    pub(crate) fn poisoned() -> Self {
        StoreError::Internal("store lock poisoned".to_string())
    }
}
