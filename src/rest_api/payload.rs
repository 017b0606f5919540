//! # Request Payloads
//!
//! Shape checks at the API boundary. Values arrive as loose JSON and are
//! coerced into typed fields here; semantic constraints stay in the store.
//!
//! Accepted inputs:
//! - numbers: JSON integers, integral floats (`30.0`), numeric strings (`"30"`)
//! - dates: `YYYY-MM-DD` or an RFC 3339 timestamp (date part kept)
//!
//! `null` is treated as absent. Unknown keys are ignored.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use serde_json::Value;

use super::errors::{RestError, RestResult};
use crate::workout::{Field, ValidationError, Violation, WorkoutFields, WorkoutPatch};

/// Raw workout body as posted by clients
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPayload {
    #[serde(default)]
    pub exercise_name: Option<Value>,
    #[serde(default)]
    pub duration: Option<Value>,
    #[serde(default)]
    pub calories_burned: Option<Value>,
    #[serde(default)]
    pub workout_date: Option<Value>,
}

impl WorkoutPayload {
    /// Unwraps the extractor result, rejecting anything but a JSON object.
    pub fn from_body(body: Result<Json<Value>, JsonRejection>) -> RestResult<Self> {
        let Json(value) = body.map_err(|rejection| RestError::InvalidBody(rejection.body_text()))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> RestResult<Self> {
        if !value.is_object() {
            return Err(RestError::InvalidBody("expected a JSON object".to_string()));
        }
        serde_json::from_value(value).map_err(|e| RestError::InvalidBody(e.to_string()))
    }

    /// Complete fields for create. All four must be present.
    pub fn into_fields(self) -> RestResult<WorkoutFields> {
        let missing = [
            &self.exercise_name,
            &self.duration,
            &self.calories_burned,
            &self.workout_date,
        ]
        .into_iter()
        .any(|v| is_blank(v.as_ref()));
        if missing {
            return Err(RestError::MissingFields);
        }

        let patch = self.into_patch()?;
        match patch {
            WorkoutPatch {
                exercise_name: Some(exercise_name),
                duration: Some(duration),
                calories_burned: Some(calories_burned),
                workout_date: Some(workout_date),
            } => Ok(WorkoutFields {
                exercise_name,
                duration,
                calories_burned,
                workout_date,
            }),
            _ => Err(RestError::MissingFields),
        }
    }

    /// Partial fields for update. Every present field must coerce.
    pub fn into_patch(self) -> RestResult<WorkoutPatch> {
        let mut violations = Vec::new();

        let exercise_name = self
            .exercise_name
            .and_then(|v| keep(&mut violations, coerce_text(&v)));
        let duration = self
            .duration
            .and_then(|v| keep(&mut violations, coerce_integer(Field::Duration, &v)));
        let calories_burned = self
            .calories_burned
            .and_then(|v| keep(&mut violations, coerce_integer(Field::CaloriesBurned, &v)));
        let workout_date = self
            .workout_date
            .and_then(|v| keep(&mut violations, coerce_date(&v)));

        ValidationError::check(violations)?;

        Ok(WorkoutPatch {
            exercise_name,
            duration,
            calories_burned,
            workout_date,
        })
    }
}

fn keep<T>(violations: &mut Vec<Violation>, result: Result<T, Violation>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(violation) => {
            violations.push(violation);
            None
        }
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn coerce_text(value: &Value) -> Result<String, Violation> {
    match value {
        Value::String(s) => Ok(s.clone()),
        _ => Err(Violation::new(
            Field::ExerciseName,
            "Exercise name must be text",
        )),
    }
}

/// Integer coercion without truncation: `30`, `30.0` and `"30"` pass,
/// `30.5` and anything outside the `i64` range do not.
fn coerce_integer(field: Field, value: &Value) -> Result<i64, Violation> {
    // `i64::MAX as f64` rounds up to 2^63, which is already out of range
    let whole = |f: f64| {
        (f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64)
            .then_some(f as i64)
    };

    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole))
        }
        _ => None,
    };

    parsed.ok_or_else(|| {
        let message = match field {
            Field::Duration => "Duration must be a whole number",
            _ => "Calories burned must be a whole number",
        };
        Violation::new(field, message)
    })
}

fn coerce_date(value: &Value) -> Result<NaiveDate, Violation> {
    let invalid = || {
        Violation::new(
            Field::WorkoutDate,
            "Workout date must be a valid date (YYYY-MM-DD)",
        )
    };

    let s = value.as_str().map(str::trim).ok_or_else(invalid)?;
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .ok_or_else(invalid)
}
