//! CLI module for fitlog
//!
//! Provides command-line interface for:
//! - serve: host the REST API
//! - list / add / delete / stats: one-shot operations on the data directory
//! - compact: rewrite the data file without dead records

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{add, compact, delete, list, run, run_command, serve, stats};
pub use config::{Config, StorageKind};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_lines, write_response};
