//! Workout form state machine
//!
//! ```text
//!            begin_edit            submit
//!   Idle ───────────────► Editing ───────► Submitting { editing: Some }
//!    │  ◄─────────────────   │                   │
//!    │      cancel_edit      │                   │ finish(Err): back to Editing
//!    │ submit                │                   │ finish(Ok):  Idle
//!    ▼                       │
//!   Submitting { editing: None } ── finish ──► Idle
//! ```
//!
//! Field text is kept raw, as typed, and only interpreted on submit.

use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;

use super::notification::Notice;
use crate::workout::{
    Workout, WorkoutFields, WorkoutId, MIN_CALORIES_BURNED, MIN_DURATION_MINUTES,
    MIN_EXERCISE_NAME_CHARS,
};

/// Why a submit was refused before reaching the server
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill in all required fields")]
    Incomplete,

    #[error("Exercise name must be at least 2 characters")]
    NameTooShort,

    #[error("Duration must be a whole number of minutes")]
    DurationNotWhole,

    #[error("Duration must be at least 1 minute")]
    DurationTooShort,

    #[error("Calories burned must be a whole number")]
    CaloriesNotWhole,

    #[error("Calories burned cannot be negative")]
    NegativeCalories,

    #[error("Workout date must be a valid date (YYYY-MM-DD)")]
    InvalidDate,

    #[error("A workout is already being saved")]
    Busy,

    #[error("No workout is being saved")]
    NotSubmitting,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Idle,
    Editing(WorkoutId),
    Submitting { editing: Option<WorkoutId> },
}

/// Raw text of the four inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub exercise_name: String,
    pub duration: String,
    pub calories_burned: String,
    pub workout_date: String,
}

impl FormFields {
    fn from_workout(workout: &Workout) -> Self {
        Self {
            exercise_name: workout.exercise_name.clone(),
            duration: workout.duration.to_string(),
            calories_burned: workout.calories_burned.to_string(),
            workout_date: workout.workout_date.format("%Y-%m-%d").to_string(),
        }
    }

    /// Client-side checks, first failure wins.
    fn check(&self) -> Result<WorkoutFields, FormError> {
        let name = self.exercise_name.trim();
        let duration = self.duration.trim();
        let calories = self.calories_burned.trim();
        let date = self.workout_date.trim();

        if name.is_empty() || duration.is_empty() || calories.is_empty() || date.is_empty() {
            return Err(FormError::Incomplete);
        }

        if name.chars().count() < MIN_EXERCISE_NAME_CHARS {
            return Err(FormError::NameTooShort);
        }

        // Fractions are refused, not truncated
        let duration: i64 = duration.parse().map_err(|_| FormError::DurationNotWhole)?;
        if duration < MIN_DURATION_MINUTES {
            return Err(FormError::DurationTooShort);
        }

        let calories: i64 = calories.parse().map_err(|_| FormError::CaloriesNotWhole)?;
        if calories < MIN_CALORIES_BURNED {
            return Err(FormError::NegativeCalories);
        }

        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| FormError::InvalidDate)?;

        Ok(WorkoutFields::new(name, duration, calories, date))
    }
}

/// Request the form wants sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(WorkoutFields),
    Update(WorkoutId, WorkoutFields),
}

impl Submission {
    pub fn method(&self) -> &'static str {
        match self {
            Submission::Create(_) => "POST",
            Submission::Update(..) => "PUT",
        }
    }

    pub fn path(&self) -> String {
        match self {
            Submission::Create(_) => "/api/workouts".to_string(),
            Submission::Update(id, _) => format!("/api/workouts/{}", id),
        }
    }

    pub fn fields(&self) -> &WorkoutFields {
        match self {
            Submission::Create(fields) | Submission::Update(_, fields) => fields,
        }
    }

    /// JSON body in the API's camelCase shape
    pub fn payload(&self) -> Value {
        let fields = self.fields();
        serde_json::json!({
            "exerciseName": fields.exercise_name,
            "duration": fields.duration,
            "caloriesBurned": fields.calories_burned,
            "workoutDate": fields.workout_date.format("%Y-%m-%d").to_string(),
        })
    }
}

/// What the caller should do after a server round-trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub notice: Notice,
    /// Re-fetch the list to pick up server state
    pub refetch: bool,
}

#[derive(Debug, Default)]
pub struct FormMachine {
    state: FormState,
    fields: FormFields,
}

impl FormMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Editable fields, or `None` while a save is in flight.
    pub fn fields_mut(&mut self) -> Option<&mut FormFields> {
        match self.state {
            FormState::Submitting { .. } => None,
            _ => Some(&mut self.fields),
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, FormState::Submitting { .. })
    }

    pub fn editing(&self) -> Option<WorkoutId> {
        match self.state {
            FormState::Idle => None,
            FormState::Editing(id) => Some(id),
            FormState::Submitting { editing } => editing,
        }
    }

    pub fn title(&self) -> &'static str {
        if self.editing().is_some() {
            "Update Workout"
        } else {
            "Log New Workout"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.state {
            FormState::Submitting { .. } => "Saving...",
            FormState::Editing(_) => "Update Workout",
            FormState::Idle => "Log Workout",
        }
    }

    /// Loads `workout` into the form for editing.
    pub fn begin_edit(&mut self, workout: &Workout) -> Result<(), FormError> {
        if self.is_submitting() {
            return Err(FormError::Busy);
        }
        self.fields = FormFields::from_workout(workout);
        self.state = FormState::Editing(workout.id);
        Ok(())
    }

    pub fn cancel_edit(&mut self) -> Result<(), FormError> {
        if self.is_submitting() {
            return Err(FormError::Busy);
        }
        self.reset();
        Ok(())
    }

    pub fn submit(&mut self) -> Result<Submission, FormError> {
        let editing = match self.state {
            FormState::Submitting { .. } => return Err(FormError::Busy),
            FormState::Idle => None,
            FormState::Editing(id) => Some(id),
        };

        let fields = self.fields.check()?;
        self.state = FormState::Submitting { editing };

        Ok(match editing {
            Some(id) => Submission::Update(id, fields),
            None => Submission::Create(fields),
        })
    }

    /// Settles an in-flight submit.
    ///
    /// `Err(Some(reason))` carries the server's error text. `Err(None)` is a
    /// failure with no usable reason.
    pub fn finish(&mut self, result: Result<(), Option<String>>) -> Result<Outcome, FormError> {
        let FormState::Submitting { editing } = self.state else {
            return Err(FormError::NotSubmitting);
        };

        match result {
            Ok(()) => {
                self.reset();
                let message = if editing.is_some() {
                    "Workout updated successfully!"
                } else {
                    "Workout logged successfully!"
                };
                Ok(Outcome {
                    notice: Notice::success(message),
                    refetch: true,
                })
            }
            Err(reason) => {
                self.state = editing.map_or(FormState::Idle, FormState::Editing);
                let message = reason
                    .filter(|r| !r.trim().is_empty())
                    .unwrap_or_else(|| "Failed to save workout. Please try again.".to_string());
                Ok(Outcome {
                    notice: Notice::error(message),
                    refetch: false,
                })
            }
        }
    }

    fn reset(&mut self) {
        self.fields = FormFields::default();
        self.state = FormState::Idle;
    }
}
