//! # REST API Module
//!
//! HTTP surface over the Record Store. Request bodies are shape-checked in
//! [`payload`], stored through [`crate::store::WorkoutStore`], and every
//! response is wrapped in an [`Envelope`].

pub mod envelope;
pub mod errors;
pub mod handler;
pub mod payload;

pub use envelope::Envelope;
pub use errors::{RestError, RestResult};
pub use handler::{workout_routes, ApiState};
pub use payload::WorkoutPayload;
