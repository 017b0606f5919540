//! REST API Tests
//!
//! Drives the full router (status routes, `/api` nest, fallback, layers)
//! in-process with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use fitlog::http_server::{HttpServer, HttpServerConfig};
use fitlog::storage::StorageError;
use fitlog::store::{FileStore, MemoryStore, StoreError, StoreResult, WorkoutStore};
use fitlog::workout::{Workout, WorkoutFields, WorkoutId, WorkoutPatch};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

// =============================================================================
// Test Utilities
// =============================================================================

fn router_with(store: Arc<dyn WorkoutStore>) -> Router {
    HttpServer::new(HttpServerConfig::default(), store).router()
}

fn memory_router() -> Router {
    router_with(Arc::new(MemoryStore::new()))
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn run_payload() -> Value {
    json!({
        "exerciseName": "Run",
        "duration": 30,
        "caloriesBurned": 250,
        "workoutDate": "2024-01-01"
    })
}

async fn create(router: &Router, body: Value) -> Value {
    let (status, json) = send(router, Method::POST, "/api/workouts", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", json);
    json["data"].clone()
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_returns_201_envelope() {
    let router = memory_router();
    let (status, json) = send(&router, Method::POST, "/api/workouts", Some(run_payload())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Workout logged successfully");
    assert_eq!(json["data"]["exerciseName"], "Run");
    assert_eq!(json["data"]["duration"], 30);
    assert_eq!(json["data"]["caloriesBurned"], 250);
    assert_eq!(json["data"]["workoutDate"], "2024-01-01");
    assert!(json["data"]["id"].is_string());
    assert!(json["data"]["createdAt"].is_string());
    assert!(json.get("error").is_none());
}

#[tokio::test]
async fn test_create_missing_field_is_400() {
    let router = memory_router();
    let (status, json) = send(
        &router,
        Method::POST,
        "/api/workouts",
        Some(json!({"exerciseName": "Run", "duration": 30})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json,
        json!({
            "success": false,
            "error": "Exercise name, duration, calories burned, and workout date are required"
        })
    );
}

#[tokio::test]
async fn test_create_constraint_violation_is_400() {
    let router = memory_router();
    let mut body = run_payload();
    body["duration"] = json!(0);

    let (status, json) = send(&router, Method::POST, "/api/workouts", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("Duration must be at least 1 minute"));

    let (_, list) = send(&router, Method::GET, "/api/workouts", None).await;
    assert_eq!(list["count"], 0);
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let router = memory_router();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/workouts")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"exerciseName\": "))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["success"], false);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));
}

// =============================================================================
// List
// =============================================================================

#[tokio::test]
async fn test_list_empty_then_newest_first() {
    let router = memory_router();

    let (status, json) = send(&router, Method::GET, "/api/workouts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"success": true, "count": 0, "data": []}));

    let a = create(&router, run_payload()).await;
    let mut swim = run_payload();
    swim["exerciseName"] = json!("Swim");
    let b = create(&router, swim).await;

    let (_, json) = send(&router, Method::GET, "/api/workouts", None).await;
    assert_eq!(json["count"], 2);
    assert_eq!(json["data"][0]["id"], b["id"]);
    assert_eq!(json["data"][1]["id"], a["id"]);
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_update_round_trip() {
    let router = memory_router();
    let created = create(&router, run_payload()).await;
    let uri = format!("/api/workouts/{}", created["id"].as_str().unwrap());

    let mut body = run_payload();
    body["duration"] = json!(45);
    body["caloriesBurned"] = json!(300);
    let (status, json) = send(&router, Method::PUT, &uri, Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Workout updated successfully");
    assert_eq!(json["data"]["duration"], 45);
    assert_eq!(json["data"]["caloriesBurned"], 300);
    assert_eq!(json["data"]["id"], created["id"]);
    assert_eq!(json["data"]["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let router = memory_router();
    let created = create(&router, run_payload()).await;
    let uri = format!("/api/workouts/{}", created["id"].as_str().unwrap());

    let (status, json) = send(&router, Method::PUT, &uri, Some(json!({"duration": "50"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["duration"], 50);
    assert_eq!(json["data"]["exerciseName"], "Run");
    assert_eq!(json["data"]["caloriesBurned"], 250);
}

#[tokio::test]
async fn test_update_unknown_id_is_404() {
    let router = memory_router();
    let uri = format!("/api/workouts/{}", uuid::Uuid::new_v4());

    let (status, json) = send(&router, Method::PUT, &uri, Some(run_payload())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({"success": false, "error": "Workout not found"}));
}

#[tokio::test]
async fn test_update_invalid_value_is_400() {
    let router = memory_router();
    let created = create(&router, run_payload()).await;
    let uri = format!("/api/workouts/{}", created["id"].as_str().unwrap());

    let body = json!({"caloriesBurned": -5});
    let (status, json) = send(&router, Method::PUT, &uri, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("Calories"));
}

// =============================================================================
// Get / Delete
// =============================================================================

#[tokio::test]
async fn test_get_and_delete() {
    let router = memory_router();
    let created = create(&router, run_payload()).await;
    let uri = format!("/api/workouts/{}", created["id"].as_str().unwrap());

    let (status, json) = send(&router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], created);

    let (status, json) = send(&router, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Workout deleted successfully");
    assert_eq!(json["data"], created);

    let (status, _) = send(&router, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_id_is_404() {
    let router = memory_router();
    let (status, json) = send(&router, Method::DELETE, "/api/workouts/12345", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Workout not found");
}

// =============================================================================
// Stats, status routes, fallback
// =============================================================================

#[tokio::test]
async fn test_stats() {
    let router = memory_router();
    create(&router, run_payload()).await;
    let mut swim = run_payload();
    swim["duration"] = json!(45);
    swim["caloriesBurned"] = json!(400);
    create(&router, swim).await;

    let (status, json) = send(&router, Method::GET, "/api/workouts/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["data"],
        json!({"totalWorkouts": 2, "totalDuration": 75, "totalCalories": 650})
    );
}

#[tokio::test]
async fn test_root_and_health() {
    let router = memory_router();

    let (status, json) = send(&router, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Fitness Tracker API is running!");

    let (status, json) = send(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_unknown_route_is_404_envelope() {
    let router = memory_router();
    let (status, json) = send(&router, Method::GET, "/api/exercises", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({"success": false, "error": "Route not found"}));
}

// =============================================================================
// Store faults
// =============================================================================

/// Store whose disk has gone bad
struct FailingStore;

impl FailingStore {
    fn fault<T>() -> StoreResult<T> {
        Err(StoreError::from(StorageError::write_failed(
            "Failed to write workout",
            std::io::Error::other("No space left on device"),
        )))
    }
}

impl WorkoutStore for FailingStore {
    fn create(&self, _fields: WorkoutFields) -> StoreResult<Workout> {
        Self::fault()
    }

    fn list(&self) -> StoreResult<Vec<Workout>> {
        Self::fault()
    }

    fn get(&self, _id: WorkoutId) -> StoreResult<Workout> {
        Self::fault()
    }

    fn update(&self, _id: WorkoutId, _patch: WorkoutPatch) -> StoreResult<Workout> {
        Self::fault()
    }

    fn delete(&self, _id: WorkoutId) -> StoreResult<Workout> {
        Self::fault()
    }
}

#[tokio::test]
async fn test_store_fault_is_500_without_detail() {
    let router = router_with(Arc::new(FailingStore));
    let item = format!("/api/workouts/{}", uuid::Uuid::new_v4());

    let requests = [
        (Method::POST, "/api/workouts", Some(run_payload())),
        (Method::GET, "/api/workouts", None),
        (Method::GET, "/api/workouts/stats", None),
        (Method::GET, item.as_str(), None),
        (Method::PUT, item.as_str(), Some(run_payload())),
        (Method::DELETE, item.as_str(), None),
    ];

    for (method, uri, body) in requests {
        let (status, json) = send(&router, method.clone(), uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{} {}", method, uri);
        assert_eq!(
            json,
            json!({"success": false, "error": "Internal server error"})
        );
    }
}

// =============================================================================
// Durability through the API
// =============================================================================

#[tokio::test]
async fn test_file_backed_api_survives_restart() {
    let temp_dir = TempDir::new().unwrap();

    let created = {
        let router = router_with(Arc::new(FileStore::open(temp_dir.path()).unwrap()));
        create(&router, run_payload()).await
    };

    let router = router_with(Arc::new(FileStore::open(temp_dir.path()).unwrap()));
    let (_, json) = send(&router, Method::GET, "/api/workouts", None).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["data"][0], created);
}
