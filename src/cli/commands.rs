//! CLI command implementations
//!
//! `serve` hosts the API. The other commands open the file store directly,
//! run one operation and print the result as JSON. The store's directory
//! lock makes them fail while a server owns the same data directory.

use std::sync::Arc;

use chrono::Local;
use tracing::info;

use crate::client::{FormMachine, ListView, Submission};
use crate::http_server::HttpServer;
use crate::observability::init_logging;
use crate::store::{CompactionReport, FileStore, MemoryStore, WorkoutStore};
use crate::workout::{Workout, WorkoutId, WorkoutStats};

use super::args::{Cli, Command};
use super::config::{Config, StorageKind};
use super::errors::{CliError, CliResult};
use super::io::{write_lines, write_response};

/// Run the CLI with parsed arguments
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let config = Config::resolve(&cli.config)?;
    init_logging(config.log_format).map_err(CliError::config_error)?;
    run_command(&config, cli.command)
}

/// Dispatch a command against a resolved configuration
pub fn run_command(config: &Config, command: Command) -> CliResult<()> {
    match command {
        Command::Serve { port, memory } => serve(config, port, memory),
        Command::List { pretty } => {
            let workouts = list(config)?;
            if pretty {
                let mut view = ListView::new();
                view.apply_fetch(Ok(workouts));
                write_lines(view.lines())
            } else {
                write_response(&workouts)
            }
        }
        Command::Add {
            name,
            duration,
            calories,
            date,
        } => write_response(&add(config, name, duration, calories, date)?),
        Command::Delete { id } => write_response(&delete(config, &id)?),
        Command::Stats => write_response(&stats(config)?),
        Command::Compact => write_response(&compact(config)?),
    }
}

/// Start the HTTP API and block until Ctrl-C.
pub fn serve(config: &Config, port: Option<u16>, memory: bool) -> CliResult<()> {
    let mut server_config = config.server.clone();
    if let Some(port) = port {
        if port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }
        server_config.port = port;
    }

    let store: Arc<dyn WorkoutStore> = if memory || config.storage == StorageKind::Memory {
        info!("using in-memory storage; workouts are lost on exit");
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(FileStore::open(config.data_path())?)
    };

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::io_error(format!("Failed to start runtime: {}", e)))?;

    let server = HttpServer::new(server_config, store);
    runtime
        .block_on(server.start())
        .map_err(|e| CliError::server_failed(e.to_string()))
}

pub fn list(config: &Config) -> CliResult<Vec<Workout>> {
    Ok(FileStore::open_for_reading(config.data_path())?.list()?)
}

/// Logs a workout from raw text, checked the same way the entry form
/// checks it.
pub fn add(
    config: &Config,
    name: String,
    duration: String,
    calories: String,
    date: Option<String>,
) -> CliResult<Workout> {
    let mut form = FormMachine::new();
    if let Some(fields) = form.fields_mut() {
        fields.exercise_name = name;
        fields.duration = duration;
        fields.calories_burned = calories;
        fields.workout_date =
            date.unwrap_or_else(|| Local::now().date_naive().format("%Y-%m-%d").to_string());
    }

    let fields = match form.submit() {
        Ok(Submission::Create(fields)) => fields,
        Ok(Submission::Update(..)) => {
            return Err(CliError::invalid_input("Unexpected update submission"))
        }
        Err(e) => return Err(CliError::invalid_input(e.to_string())),
    };

    let workout = FileStore::open(config.data_path())?.create(fields)?;
    info!(id = %workout.id, "workout logged");
    Ok(workout)
}

pub fn delete(config: &Config, id: &str) -> CliResult<Workout> {
    let id: WorkoutId = id
        .parse()
        .map_err(|_| CliError::invalid_input(format!("Invalid workout id: '{}'", id)))?;
    Ok(FileStore::open(config.data_path())?.delete(id)?)
}

pub fn stats(config: &Config) -> CliResult<WorkoutStats> {
    Ok(FileStore::open_for_reading(config.data_path())?.stats()?)
}

pub fn compact(config: &Config) -> CliResult<CompactionReport> {
    Ok(FileStore::open(config.data_path())?.compact()?)
}
