//! CLI argument definitions using clap
//!
//! Commands:
//! - fitlog serve [--port <port>] [--memory]
//! - fitlog list [--pretty]
//! - fitlog add --name <name> --duration <min> --calories <kcal> [--date <YYYY-MM-DD>]
//! - fitlog delete <id>
//! - fitlog stats
//! - fitlog compact
//!
//! Every command accepts `--config <path>`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// fitlog - log workouts and serve them over a REST API
#[derive(Parser, Debug)]
#[command(name = "fitlog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = "./fitlog.json")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start the HTTP API
    Serve {
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,

        /// Keep workouts in memory only
        #[arg(long)]
        memory: bool,
    },

    /// Print all workouts, newest first
    List {
        /// One human-readable line per workout instead of JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Log a workout
    Add {
        /// Exercise name
        #[arg(long)]
        name: String,

        /// Duration in minutes
        #[arg(long)]
        duration: String,

        /// Calories burned
        #[arg(long)]
        calories: String,

        /// Workout date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete a workout by id
    Delete {
        /// Workout id
        id: String,
    },

    /// Print workout totals
    Stats,

    /// Rewrite the data file without dead records
    Compact,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "fitlog",
            "add",
            "--name",
            "Run",
            "--duration",
            "30",
            "--calories",
            "250",
        ])
        .unwrap();

        assert_eq!(cli.config, PathBuf::from("./fitlog.json"));
        assert_eq!(
            cli.command,
            Command::Add {
                name: "Run".to_string(),
                duration: "30".to_string(),
                calories: "250".to_string(),
                date: None,
            }
        );
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from([
            "fitlog",
            "serve",
            "--config",
            "/etc/fitlog.json",
            "--port",
            "8080",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("/etc/fitlog.json"));
        assert_eq!(
            cli.command,
            Command::Serve {
                port: Some(8080),
                memory: false
            }
        );
    }

    #[test]
    fn test_delete_requires_id() {
        assert!(Cli::try_parse_from(["fitlog", "delete"]).is_err());
    }
}
