//! Validation error types for workout fields

use std::fmt;

use thiserror::Error;

/// Workout fields that can carry a violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ExerciseName,
    Duration,
    CaloriesBurned,
    WorkoutDate,
}

impl Field {
    /// Returns the wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::ExerciseName => "exerciseName",
            Field::Duration => "duration",
            Field::CaloriesBurned => "caloriesBurned",
            Field::WorkoutDate => "workoutDate",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single violated constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Field that failed
    pub field: Field,
    /// Human-readable reason, suitable for end users
    pub message: String,
}

impl Violation {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    pub fn required(field: Field) -> Self {
        let message = match field {
            Field::ExerciseName => "Exercise name is required",
            Field::Duration => "Duration is required",
            Field::CaloriesBurned => "Calories burned is required",
            Field::WorkoutDate => "Workout date is required",
        };
        Self::new(field, message)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Input failed one or more declared field constraints.
///
/// Always holds at least one violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Workout validation failed: {}", render(.violations))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

fn render(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    /// Turns a violation list into a result: empty means valid.
    pub fn check(violations: Vec<Violation>) -> Result<(), ValidationError> {
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Self { violations })
        }
    }

    pub fn single(violation: Violation) -> Self {
        Self {
            violations: vec![violation],
        }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns whether the given field is among the violations
    pub fn has_field(&self, field: Field) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}
