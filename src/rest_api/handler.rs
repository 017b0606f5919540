//! # Workout Routes
//!
//! Translates HTTP requests into Record Store operations.
//!
//! | Method | Path                 | Store call |
//! |--------|----------------------|------------|
//! | POST   | `/workouts`          | create     |
//! | GET    | `/workouts`          | list       |
//! | GET    | `/workouts/stats`    | stats      |
//! | GET    | `/workouts/:id`      | get        |
//! | PUT    | `/workouts/:id`      | update     |
//! | DELETE | `/workouts/:id`      | delete     |
//!
//! Store calls may fsync, so they run on the blocking pool.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;
use tracing::info;

use super::envelope::Envelope;
use super::errors::{RestError, RestResult};
use super::payload::WorkoutPayload;
use crate::store::{StoreResult, WorkoutStore};
use crate::workout::{Workout, WorkoutId, WorkoutStats};

/// State shared by the workout handlers
pub struct ApiState {
    store: Arc<dyn WorkoutStore>,
}

impl ApiState {
    pub fn new(store: Arc<dyn WorkoutStore>) -> Self {
        Self { store }
    }

    /// Runs a store operation off the async reactor.
    async fn run<T, F>(&self, op: F) -> RestResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn WorkoutStore) -> StoreResult<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(store.as_ref()))
            .await
            .map_err(|e| RestError::Internal(format!("store task failed: {}", e)))?
            .map_err(RestError::from)
    }
}

type SharedState = State<Arc<ApiState>>;
type Created<T> = (StatusCode, Json<Envelope<T>>);

/// Create workout routes (mounted under `/api`)
pub fn workout_routes(state: Arc<ApiState>) -> Router {
    Router::new()
        .route(
            "/workouts",
            get(list_workouts_handler).post(create_workout_handler),
        )
        .route("/workouts/stats", get(workout_stats_handler))
        .route(
            "/workouts/:id",
            get(get_workout_handler)
                .put(update_workout_handler)
                .delete(delete_workout_handler),
        )
        .with_state(state)
}

/// Unparseable ids cannot name a stored workout.
fn parse_id(raw: &str) -> RestResult<WorkoutId> {
    raw.parse().map_err(|_| RestError::NotFound)
}

async fn create_workout_handler(
    State(state): SharedState,
    body: Result<Json<Value>, JsonRejection>,
) -> RestResult<Created<Workout>> {
    let fields = WorkoutPayload::from_body(body)?.into_fields()?;
    let workout = state.run(move |store| store.create(fields)).await?;

    info!(id = %workout.id, exercise = %workout.exercise_name, "workout logged");
    Ok((
        StatusCode::CREATED,
        Json(Envelope::with_message("Workout logged successfully", workout)),
    ))
}

async fn list_workouts_handler(
    State(state): SharedState,
) -> RestResult<Json<Envelope<Vec<Workout>>>> {
    let workouts = state.run(|store| store.list()).await?;
    Ok(Json(Envelope::list(workouts)))
}

async fn workout_stats_handler(
    State(state): SharedState,
) -> RestResult<Json<Envelope<WorkoutStats>>> {
    let stats = state.run(|store| store.stats()).await?;
    Ok(Json(Envelope::ok(stats)))
}

async fn get_workout_handler(
    State(state): SharedState,
    Path(id): Path<String>,
) -> RestResult<Json<Envelope<Workout>>> {
    let id = parse_id(&id)?;
    let workout = state.run(move |store| store.get(id)).await?;
    Ok(Json(Envelope::ok(workout)))
}

async fn update_workout_handler(
    State(state): SharedState,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> RestResult<Json<Envelope<Workout>>> {
    let patch = WorkoutPayload::from_body(body)?.into_patch()?;
    let id = parse_id(&id)?;
    let workout = state.run(move |store| store.update(id, patch)).await?;

    info!(id = %id, "workout updated");
    Ok(Json(Envelope::with_message(
        "Workout updated successfully",
        workout,
    )))
}

async fn delete_workout_handler(
    State(state): SharedState,
    Path(id): Path<String>,
) -> RestResult<Json<Envelope<Workout>>> {
    let id = parse_id(&id)?;
    let workout = state.run(move |store| store.delete(id)).await?;

    info!(id = %id, "workout deleted");
    Ok(Json(Envelope::with_message(
        "Workout deleted successfully",
        workout,
    )))
}
