//! fitlog - a small, durable fitness log
//!
//! Workout records are validated by [`workout`], persisted by [`store`] on
//! top of the append-only [`storage`] engine, and served over HTTP by
//! [`rest_api`] and [`http_server`]. [`client`] holds the front-end logic.

pub mod cli;
pub mod client;
pub mod http_server;
pub mod observability;
pub mod rest_api;
pub mod storage;
pub mod store;
pub mod workout;
