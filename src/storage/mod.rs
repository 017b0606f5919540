//! Workout storage engine for fitlog
//!
//! Holds the durable state of all workouts in a single append-only record
//! file, `<data_dir>/data/workouts.dat`.
//!
//! # Design Principles
//!
//! - Append-only (no in-place updates)
//! - Checksum-verified on every read
//! - Latest record wins for the same workout id
//! - Deletes append a tombstone; compaction drops tombstones and
//!   superseded versions from disk
//! - fsync before a write is acknowledged
//! - Any corruption refuses the open
//! - One process owns a data directory at a time

mod checksum;
mod errors;
mod lock;
mod reader;
mod record;
mod writer;

pub use checksum::{compute_checksum, verify_checksum};
pub use errors::{Severity, StorageError, StorageErrorCode, StorageResult};
pub use lock::{lock_path, DataDirLock, LOCK_FILE};
pub use reader::StorageReader;
pub use record::WorkoutRecord;
pub use writer::StorageWriter;

use std::path::{Path, PathBuf};

/// Subdirectory of the data directory holding the record file
pub const DATA_SUBDIR: &str = "data";
/// Record file name
pub const STORAGE_FILE: &str = "workouts.dat";

/// Returns `<data_dir>/data/workouts.dat`
pub fn storage_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DATA_SUBDIR).join(STORAGE_FILE)
}
