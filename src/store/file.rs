//! Durable store over the append-only storage engine
//!
//! Open sequence:
//! 1. Take the data directory lock, failing if another process holds it
//! 2. Replay the record file in order (latest record wins, tombstones remove)
//! 3. Compact if the file holds any dead records (skipped by
//!    [`FileStore::open_for_reading`])
//! 4. Serve from the in-memory table; every mutation is fsynced to the
//!    record file before the table changes

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;
use tracing::{debug, info};

use super::errors::{StoreError, StoreResult};
use super::table::WorkoutTable;
use super::WorkoutStore;
use crate::storage::{DataDirLock, StorageReader, StorageWriter, WorkoutRecord};
use crate::workout::{Workout, WorkoutFields, WorkoutId, WorkoutPatch};

/// Outcome of a compaction pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompactionReport {
    /// Live workouts kept
    pub live: usize,
    /// Tombstones and superseded versions dropped
    pub purged: usize,
    /// File size after compaction
    pub bytes: u64,
}

struct Inner {
    writer: StorageWriter,
    table: WorkoutTable,
    /// Records in the file that no longer describe a live workout
    dead_records: usize,
}

/// Store backed by `<data_dir>/data/workouts.dat`
pub struct FileStore {
    data_dir: PathBuf,
    inner: Mutex<Inner>,
    // Declared last so it is released after the writer closes
    _lock: DataDirLock,
}

impl FileStore {
    /// Opens (or creates) the store under `data_dir`.
    ///
    /// Fails with `FITLOG_DATA_DIR_LOCKED` while another store owns the
    /// directory, and with `FITLOG_DATA_CORRUPTION` if any record is damaged.
    pub fn open(data_dir: impl AsRef<Path>) -> StoreResult<Self> {
        let store = Self::open_uncompacted(data_dir.as_ref())?;
        if store.dead_records()? > 0 {
            store.compact()?;
        }
        Ok(store)
    }

    /// Like [`FileStore::open`], but leaves the record file as it is.
    pub fn open_for_reading(data_dir: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open_uncompacted(data_dir.as_ref())
    }

    fn open_uncompacted(data_dir: &Path) -> StoreResult<Self> {
        let data_dir = data_dir.to_path_buf();
        let lock = DataDirLock::acquire(&data_dir)?;
        let writer = StorageWriter::open(&data_dir)?;

        let (table, dead_records) = replay(writer.path())?;
        info!(
            data_dir = %data_dir.display(),
            workouts = table.len(),
            dead_records,
            "workout store opened"
        );

        Ok(Self {
            data_dir,
            inner: Mutex::new(Inner {
                writer,
                table,
                dead_records,
            }),
            _lock: lock,
        })
    }

    fn dead_records(&self) -> StoreResult<usize> {
        let inner = self.inner.lock().map_err(|_| StoreError::poisoned())?;
        Ok(inner.dead_records)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Rewrites the record file so it holds exactly one record per live
    /// workout, in creation order.
    pub fn compact(&self) -> StoreResult<CompactionReport> {
        let mut inner = self.inner.lock().map_err(|_| StoreError::poisoned())?;

        let records = inner
            .table
            .in_creation_order()
            .into_iter()
            .map(live_record)
            .collect::<StoreResult<Vec<_>>>()?;

        let bytes = inner.writer.rewrite(&records)?;
        let report = CompactionReport {
            live: records.len(),
            purged: inner.dead_records,
            bytes,
        };
        inner.dead_records = 0;

        info!(
            live = report.live,
            purged = report.purged,
            bytes = report.bytes,
            "workout store compacted"
        );
        Ok(report)
    }
}

fn live_record(workout: &Workout) -> StoreResult<WorkoutRecord> {
    WorkoutRecord::live(workout).map_err(|e| {
        StoreError::Internal(format!("Failed to encode workout {}: {}", workout.id, e))
    })
}

/// Rebuilds the table from the record file.
///
/// Returns the table and the number of dead records encountered.
fn replay(path: &Path) -> StoreResult<(WorkoutTable, usize)> {
    let mut table = WorkoutTable::new();
    let mut dead_records = 0;

    let mut reader = StorageReader::open(path)?;
    while let Some(record) = reader.read_next()? {
        if record.is_tombstone {
            let id = record.id()?;
            // The tombstone and the live record it cancels are both dead
            dead_records += 1 + usize::from(table.remove(id).is_ok());
            continue;
        }

        let workout = record.decode_workout()?;
        if table.get(workout.id).is_ok() {
            dead_records += 1;
        }
        table.upsert(workout);
    }

    Ok((table, dead_records))
}

impl WorkoutStore for FileStore {
    fn create(&self, fields: WorkoutFields) -> StoreResult<Workout> {
        let mut inner = self.inner.lock().map_err(|_| StoreError::poisoned())?;

        let workout = inner.table.prepare_create(fields)?;
        inner.writer.append(&live_record(&workout)?)?;
        inner.table.upsert(workout.clone());

        debug!(id = %workout.id, "workout created");
        Ok(workout)
    }

    fn list(&self) -> StoreResult<Vec<Workout>> {
        let inner = self.inner.lock().map_err(|_| StoreError::poisoned())?;
        Ok(inner.table.list())
    }

    fn get(&self, id: WorkoutId) -> StoreResult<Workout> {
        let inner = self.inner.lock().map_err(|_| StoreError::poisoned())?;
        inner.table.get(id).cloned()
    }

    fn update(&self, id: WorkoutId, patch: WorkoutPatch) -> StoreResult<Workout> {
        let mut inner = self.inner.lock().map_err(|_| StoreError::poisoned())?;

        let workout = inner.table.prepare_update(id, patch)?;
        inner.writer.append(&live_record(&workout)?)?;
        inner.table.upsert(workout.clone());
        inner.dead_records += 1;

        debug!(id = %id, "workout updated");
        Ok(workout)
    }

    fn delete(&self, id: WorkoutId) -> StoreResult<Workout> {
        let mut inner = self.inner.lock().map_err(|_| StoreError::poisoned())?;

        inner.table.get(id)?;
        inner.writer.append(&WorkoutRecord::tombstone(id))?;
        let workout = inner.table.remove(id)?;
        inner.dead_records += 2;

        debug!(id = %id, "workout deleted");
        Ok(workout)
    }
}
