//! Field constraint checks
//!
//! Validation does not mutate its input and is deterministic: the same
//! fields always produce the same violations, in field order.

use super::errors::{Field, Violation};
use super::types::{WorkoutFields, WorkoutPatch};

/// Minimum exercise name length, in characters, after trimming
pub const MIN_EXERCISE_NAME_CHARS: usize = 2;
/// Minimum duration in minutes
pub const MIN_DURATION_MINUTES: i64 = 1;
/// Minimum calories burned
pub const MIN_CALORIES_BURNED: i64 = 0;

/// Checks every constraint and returns all violations.
///
/// The exercise name is judged on its trimmed form, so callers may pass
/// raw input.
pub fn validate(fields: &WorkoutFields) -> Vec<Violation> {
    check_name(&fields.exercise_name)
        .into_iter()
        .chain(check_duration(fields.duration))
        .chain(check_calories(fields.calories_burned))
        .collect()
}

fn check_name(name: &str) -> Option<Violation> {
    let name = name.trim();
    if name.is_empty() {
        Some(Violation::required(Field::ExerciseName))
    } else if name.chars().count() < MIN_EXERCISE_NAME_CHARS {
        Some(Violation::new(
            Field::ExerciseName,
            "Exercise name must be at least 2 characters",
        ))
    } else {
        None
    }
}

fn check_duration(duration: i64) -> Option<Violation> {
    (duration < MIN_DURATION_MINUTES)
        .then(|| Violation::new(Field::Duration, "Duration must be at least 1 minute"))
}

fn check_calories(calories: i64) -> Option<Violation> {
    (calories < MIN_CALORIES_BURNED)
        .then(|| Violation::new(Field::CaloriesBurned, "Calories cannot be negative"))
}

/// Checks only the fields present in `patch`.
pub fn validate_patch(patch: &WorkoutPatch) -> Vec<Violation> {
    let mut violations = Vec::new();

    if let Some(name) = &patch.exercise_name {
        violations.extend(check_name(name));
    }
    if let Some(duration) = patch.duration {
        violations.extend(check_duration(duration));
    }
    if let Some(calories) = patch.calories_burned {
        violations.extend(check_calories(calories));
    }

    violations
}
