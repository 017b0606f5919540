//! Workout record and input types

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque, store-generated workout identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(Uuid);

impl WorkoutId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WorkoutId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// A persisted workout.
///
/// `id` and `created_at` are assigned once by the store and never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: WorkoutId,
    pub exercise_name: String,
    /// Minutes
    pub duration: i64,
    pub calories_burned: i64,
    pub workout_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Workout {
    /// The caller-mutable part of the record
    pub fn fields(&self) -> WorkoutFields {
        WorkoutFields {
            exercise_name: self.exercise_name.clone(),
            duration: self.duration,
            calories_burned: self.calories_burned,
            workout_date: self.workout_date,
        }
    }

    /// Returns a copy with the mutable fields replaced, keeping identity.
    pub(crate) fn with_fields(&self, fields: WorkoutFields) -> Workout {
        Workout {
            id: self.id,
            exercise_name: fields.exercise_name,
            duration: fields.duration,
            calories_burned: fields.calories_burned,
            workout_date: fields.workout_date,
            created_at: self.created_at,
        }
    }
}

/// Complete set of caller-supplied fields, as used by create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutFields {
    pub exercise_name: String,
    pub duration: i64,
    pub calories_burned: i64,
    pub workout_date: NaiveDate,
}

impl WorkoutFields {
    pub fn new(
        exercise_name: impl Into<String>,
        duration: i64,
        calories_burned: i64,
        workout_date: NaiveDate,
    ) -> Self {
        Self {
            exercise_name: exercise_name.into(),
            duration,
            calories_burned,
            workout_date,
        }
    }

    /// Canonical form: exercise name trimmed of surrounding whitespace.
    pub fn normalized(mut self) -> Self {
        let trimmed = self.exercise_name.trim();
        if trimmed.len() != self.exercise_name.len() {
            self.exercise_name = trimmed.to_string();
        }
        self
    }
}

/// Partial update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkoutPatch {
    pub exercise_name: Option<String>,
    pub duration: Option<i64>,
    pub calories_burned: Option<i64>,
    pub workout_date: Option<NaiveDate>,
}

impl WorkoutPatch {
    pub fn is_empty(&self) -> bool {
        self.exercise_name.is_none()
            && self.duration.is_none()
            && self.calories_burned.is_none()
            && self.workout_date.is_none()
    }

    /// Overlays the patch onto `base`.
    pub fn apply_to(self, base: WorkoutFields) -> WorkoutFields {
        WorkoutFields {
            exercise_name: self.exercise_name.unwrap_or(base.exercise_name),
            duration: self.duration.unwrap_or(base.duration),
            calories_burned: self.calories_burned.unwrap_or(base.calories_burned),
            workout_date: self.workout_date.unwrap_or(base.workout_date),
        }
    }
}

impl From<WorkoutFields> for WorkoutPatch {
    fn from(fields: WorkoutFields) -> Self {
        Self {
            exercise_name: Some(fields.exercise_name),
            duration: Some(fields.duration),
            calories_burned: Some(fields.calories_burned),
            workout_date: Some(fields.workout_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_workout_serializes_camel_case() {
        let workout = Workout {
            id: WorkoutId::generate(),
            exercise_name: "Run".to_string(),
            duration: 30,
            calories_burned: 250,
            workout_date: date("2024-01-01"),
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&workout).unwrap();
        assert_eq!(value["exerciseName"], json!("Run"));
        assert_eq!(value["caloriesBurned"], json!(250));
        assert_eq!(value["workoutDate"], json!("2024-01-01"));
        assert_eq!(value["id"], json!(workout.id.to_string()));
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn test_normalized_trims_name() {
        let fields = WorkoutFields::new("  Squats \t", 10, 80, date("2024-02-02")).normalized();
        assert_eq!(fields.exercise_name, "Squats");
    }

    #[test]
    fn test_patch_keeps_absent_fields() {
        let base = WorkoutFields::new("Run", 30, 250, date("2024-01-01"));
        let patch = WorkoutPatch {
            duration: Some(45),
            ..Default::default()
        };

        let merged = patch.apply_to(base);
        assert_eq!(merged.exercise_name, "Run");
        assert_eq!(merged.duration, 45);
        assert_eq!(merged.calories_burned, 250);
    }

    #[test]
    fn test_id_parse_rejects_garbage() {
        assert!("not-an-id".parse::<WorkoutId>().is_err());
        let id = WorkoutId::generate();
        assert_eq!(id.to_string().parse::<WorkoutId>().unwrap(), id);
    }
}
