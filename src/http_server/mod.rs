//! # HTTP Server Module
//!
//! Hosts the workout API on axum.
//!
//! # Endpoints
//!
//! - `/` - Banner
//! - `/health` - Health check
//! - `/api/workouts*` - Workout CRUD and stats

pub mod config;
pub mod server;
pub mod status_routes;

pub use config::HttpServerConfig;
pub use server::HttpServer;
