//! Volatile store

use std::sync::RwLock;

use tracing::debug;

use super::errors::{StoreError, StoreResult};
use super::table::WorkoutTable;
use super::WorkoutStore;
use crate::workout::{Workout, WorkoutFields, WorkoutId, WorkoutPatch};

/// Store that keeps workouts in process memory only
#[derive(Default)]
pub struct MemoryStore {
    table: RwLock<WorkoutTable>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(WorkoutTable::new()),
        }
    }
}

impl WorkoutStore for MemoryStore {
    fn create(&self, fields: WorkoutFields) -> StoreResult<Workout> {
        let mut table = self.table.write().map_err(|_| StoreError::poisoned())?;
        let workout = table.prepare_create(fields)?;
        table.upsert(workout.clone());
        debug!(id = %workout.id, "workout created");
        Ok(workout)
    }

    fn list(&self) -> StoreResult<Vec<Workout>> {
        let table = self.table.read().map_err(|_| StoreError::poisoned())?;
        Ok(table.list())
    }

    fn get(&self, id: WorkoutId) -> StoreResult<Workout> {
        let table = self.table.read().map_err(|_| StoreError::poisoned())?;
        table.get(id).cloned()
    }

    fn update(&self, id: WorkoutId, patch: WorkoutPatch) -> StoreResult<Workout> {
        let mut table = self.table.write().map_err(|_| StoreError::poisoned())?;
        let workout = table.prepare_update(id, patch)?;
        table.upsert(workout.clone());
        debug!(id = %id, "workout updated");
        Ok(workout)
    }

    fn delete(&self, id: WorkoutId) -> StoreResult<Workout> {
        let mut table = self.table.write().map_err(|_| StoreError::poisoned())?;
        let workout = table.remove(id)?;
        debug!(id = %id, "workout deleted");
        Ok(workout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_create_then_get() {
        let store = MemoryStore::new();
        let created = store
            .create(WorkoutFields::new(
                " Plank ",
                5,
                20,
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            ))
            .unwrap();

        assert_eq!(created.exercise_name, "Plank");
        assert_eq!(store.get(created.id).unwrap(), created);
    }
}
