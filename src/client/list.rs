//! Workout history view model

use tracing::warn;

use super::form::Outcome;
use super::format::{format_timestamp, format_workout_date};
use super::notification::Notice;
use crate::workout::{Workout, WorkoutStats};

/// Fetched workouts plus the derived dashboard totals.
///
/// Starts in the loading state, before the first fetch resolves.
#[derive(Debug, Clone)]
pub struct ListView {
    workouts: Vec<Workout>,
    stats: WorkoutStats,
    loading: bool,
}

impl Default for ListView {
    fn default() -> Self {
        Self {
            workouts: Vec::new(),
            stats: WorkoutStats::default(),
            loading: true,
        }
    }
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn stats(&self) -> &WorkoutStats {
        &self.stats
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn begin_fetch(&mut self) {
        self.loading = true;
    }

    /// Replaces the list wholesale on success. A failed fetch keeps the
    /// previous list and returns a notice.
    pub fn apply_fetch(&mut self, result: Result<Vec<Workout>, String>) -> Option<Notice> {
        self.loading = false;
        match result {
            Ok(workouts) => {
                self.stats = WorkoutStats::from_workouts(&workouts);
                self.workouts = workouts;
                None
            }
            Err(reason) => {
                warn!(%reason, "workout fetch failed");
                Some(Notice::error("Failed to load workouts. Please try again."))
            }
        }
    }

    /// The list itself changes only via the refetch this requests.
    pub fn apply_delete(&self, result: Result<(), String>) -> Outcome {
        match result {
            Ok(()) => Outcome {
                notice: Notice::success("Workout deleted successfully!"),
                refetch: true,
            },
            Err(reason) => {
                warn!(%reason, "workout delete failed");
                Outcome {
                    notice: Notice::error("Failed to delete workout. Please try again."),
                    refetch: false,
                }
            }
        }
    }

    /// `(N Records)` heading suffix
    pub fn count_label(&self) -> String {
        format!("({} Records)", self.workouts.len())
    }

    /// One display line per workout, newest first.
    pub fn lines(&self) -> Vec<String> {
        self.workouts.iter().map(display_line).collect()
    }
}

pub fn display_line(workout: &Workout) -> String {
    format!(
        "{} | {} | {} min | {} cal | logged {}",
        workout.exercise_name,
        format_workout_date(workout.workout_date),
        workout.duration,
        workout.calories_burned,
        format_timestamp(&workout.created_at),
    )
}
