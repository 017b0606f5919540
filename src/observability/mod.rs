//! Observability
//!
//! Structured logging via `tracing`. Call [`init_logging`] once at startup.

mod logger;

pub use logger::{init_logging, LogFormat, DEFAULT_FILTER};
