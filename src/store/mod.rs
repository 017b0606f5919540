//! Record Store: durable storage and constraint enforcement for workouts
//!
//! Two implementations share one in-memory table:
//! - [`MemoryStore`]: volatile, for tests and throwaway servers
//! - [`FileStore`]: persists every mutation to the storage engine before
//!   acknowledging it
//!
//! Both serialize mutations internally. Concurrent updates to the same id
//! are last-writer-wins.

mod errors;
mod file;
mod memory;
mod table;

pub use errors::{StoreError, StoreResult};
pub use file::{CompactionReport, FileStore};
pub use memory::MemoryStore;

use crate::workout::{Workout, WorkoutFields, WorkoutId, WorkoutPatch, WorkoutStats};

/// Persistence abstraction for workout records.
pub trait WorkoutStore: Send + Sync {
    /// Validates and persists a new workout, assigning `id` and `createdAt`.
    fn create(&self, fields: WorkoutFields) -> StoreResult<Workout>;

    /// All workouts, most recently created first. Empty, never an error,
    /// when there are none.
    fn list(&self) -> StoreResult<Vec<Workout>>;

    fn get(&self, id: WorkoutId) -> StoreResult<Workout>;

    /// Re-validates the supplied fields and replaces them.
    ///
    /// `id` and `createdAt` are preserved. Fields absent from `patch` keep
    /// their stored values.
    fn update(&self, id: WorkoutId, patch: WorkoutPatch) -> StoreResult<Workout>;

    /// Permanently removes a workout and returns it.
    fn delete(&self, id: WorkoutId) -> StoreResult<Workout>;

    fn stats(&self) -> StoreResult<WorkoutStats> {
        Ok(WorkoutStats::from_workouts(&self.list()?))
    }
}
