//! In-memory workout table shared by both store implementations
//!
//! The table owns ordering: rows carry a creation sequence number so that
//! workouts created within the same clock tick still list newest first.

use std::collections::HashMap;

use chrono::Utc;

use super::errors::{StoreError, StoreResult};
use crate::workout::{
    validate, validate_patch, ValidationError, Workout, WorkoutFields, WorkoutId, WorkoutPatch,
};

struct Row {
    seq: u64,
    workout: Workout,
}

#[derive(Default)]
pub(crate) struct WorkoutTable {
    rows: HashMap<WorkoutId, Row>,
    next_seq: u64,
}

impl WorkoutTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    /// Builds a new, not yet stored workout from validated fields.
    pub(crate) fn prepare_create(&self, fields: WorkoutFields) -> StoreResult<Workout> {
        let fields = fields.normalized();
        ValidationError::check(validate(&fields))?;

        let mut id = WorkoutId::generate();
        while self.rows.contains_key(&id) {
            id = WorkoutId::generate();
        }

        Ok(Workout {
            id,
            exercise_name: fields.exercise_name,
            duration: fields.duration,
            calories_burned: fields.calories_burned,
            workout_date: fields.workout_date,
            created_at: Utc::now(),
        })
    }

    /// Builds the updated version of `id` without storing it.
    ///
    /// Supplied fields are validated before the lookup, so an invalid
    /// payload is reported even for an unknown id.
    pub(crate) fn prepare_update(
        &self,
        id: WorkoutId,
        patch: WorkoutPatch,
    ) -> StoreResult<Workout> {
        ValidationError::check(validate_patch(&patch))?;

        let current = self.get(id)?;
        let merged = patch.apply_to(current.fields()).normalized();
        ValidationError::check(validate(&merged))?;

        Ok(current.with_fields(merged))
    }

    pub(crate) fn get(&self, id: WorkoutId) -> StoreResult<&Workout> {
        self.rows
            .get(&id)
            .map(|row| &row.workout)
            .ok_or(StoreError::NotFound(id))
    }

    /// Inserts or replaces. A replaced row keeps its creation sequence.
    pub(crate) fn upsert(&mut self, workout: Workout) {
        match self.rows.get_mut(&workout.id) {
            Some(row) => row.workout = workout,
            None => {
                let seq = self.next_seq;
                self.next_seq += 1;
                self.rows.insert(workout.id, Row { seq, workout });
            }
        }
    }

    pub(crate) fn remove(&mut self, id: WorkoutId) -> StoreResult<Workout> {
        self.rows
            .remove(&id)
            .map(|row| row.workout)
            .ok_or(StoreError::NotFound(id))
    }

    /// Workouts ordered by `createdAt` descending, then by creation order.
    pub(crate) fn list(&self) -> Vec<Workout> {
        let mut rows: Vec<&Row> = self.rows.values().collect();
        rows.sort_by(|a, b| {
            b.workout
                .created_at
                .cmp(&a.workout.created_at)
                .then(b.seq.cmp(&a.seq))
        });
        rows.into_iter().map(|row| row.workout.clone()).collect()
    }

    /// Workouts in creation order, oldest first.
    pub(crate) fn in_creation_order(&self) -> Vec<&Workout> {
        let mut rows: Vec<&Row> = self.rows.values().collect();
        rows.sort_by_key(|row| row.seq);
        rows.into_iter().map(|row| &row.workout).collect()
    }
}
