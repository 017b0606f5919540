//! Aggregate totals over a set of workouts

use serde::{Deserialize, Serialize};

use super::types::Workout;

/// Dashboard totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutStats {
    pub total_workouts: usize,
    /// Minutes trained
    pub total_duration: i64,
    pub total_calories: i64,
}

impl WorkoutStats {
    pub fn from_workouts(workouts: &[Workout]) -> Self {
        workouts.iter().fold(Self::default(), |acc, w| Self {
            total_workouts: acc.total_workouts + 1,
            total_duration: acc.total_duration.saturating_add(w.duration),
            total_calories: acc.total_calories.saturating_add(w.calories_burned),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workout::WorkoutId;
    use chrono::{NaiveDate, Utc};

    fn workout(duration: i64, calories: i64) -> Workout {
        Workout {
            id: WorkoutId::generate(),
            exercise_name: "Row".to_string(),
            duration,
            calories_burned: calories,
            workout_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_stats() {
        assert_eq!(WorkoutStats::from_workouts(&[]), WorkoutStats::default());
    }

    #[test]
    fn test_totals() {
        let stats = WorkoutStats::from_workouts(&[workout(30, 250), workout(15, 100)]);
        assert_eq!(stats.total_workouts, 2);
        assert_eq!(stats.total_duration, 45);
        assert_eq!(stats.total_calories, 350);

        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["totalWorkouts"], 2);
        assert_eq!(json["totalCalories"], 350);
    }
}
