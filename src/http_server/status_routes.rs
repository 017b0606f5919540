//! Status Routes
//!
//! Liveness endpoints outside the `/api` namespace.

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Banner returned at `/`
#[derive(Debug, Serialize)]
pub struct BannerResponse {
    pub message: String,
}

pub fn status_routes() -> Router {
    Router::new()
        .route("/", get(banner_handler))
        .route("/health", get(health_handler))
}

async fn banner_handler() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: "Fitness Tracker API is running!".to_string(),
    })
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], "0.1.0");
    }
}
