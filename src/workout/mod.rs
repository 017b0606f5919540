//! Workout records: the single entity of fitlog
//!
//! A workout is created with four caller-supplied fields and gains an
//! immutable `id` and `createdAt` from the store.
//!
//! # Field Constraints
//!
//! - `exerciseName`: trimmed, at least 2 characters
//! - `duration`: whole minutes, at least 1
//! - `caloriesBurned`: whole number, not negative
//! - `workoutDate`: calendar date, required
//!
//! Validation is a pure function over the fields and returns every
//! violation at once; it never touches storage.

mod errors;
mod stats;
mod types;
mod validator;

pub use errors::{Field, ValidationError, Violation};
pub use stats::WorkoutStats;
pub use types::{Workout, WorkoutFields, WorkoutId, WorkoutPatch};
pub use validator::{
    validate, validate_patch, MIN_CALORIES_BURNED, MIN_DURATION_MINUTES, MIN_EXERCISE_NAME_CHARS,
};
