//! Append-only record writer with fsync enforcement
//!
//! A write is not acknowledged until the record is fsynced. Compaction
//! writes the live set to a side file, fsyncs it and renames it over the
//! record file, so a crash leaves either the old or the new file intact.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::error;

use super::errors::{StorageError, StorageResult};
use super::record::WorkoutRecord;

const COMPACT_SUFFIX: &str = "compact";

/// Writer that owns `<data_dir>/data/workouts.dat`
pub struct StorageWriter {
    storage_path: PathBuf,
    file: File,
    current_offset: u64,
}

impl StorageWriter {
    /// Opens or creates the record file under `data_dir`.
    ///
    /// Creates parent directories if needed.
    pub fn open(data_dir: &Path) -> StorageResult<Self> {
        let storage_path = super::storage_path(data_dir);

        if let Some(parent) = storage_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                StorageError::write_failed(
                    format!("Failed to create data directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        let file = open_append(&storage_path)?;
        let current_offset = file
            .metadata()
            .map_err(|e| StorageError::write_failed("Failed to read file metadata", e))?
            .len();

        Ok(Self {
            storage_path,
            file,
            current_offset,
        })
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    /// Size of the record file in bytes
    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    /// Appends one record and fsyncs.
    ///
    /// Returns the byte offset the record was written at. On failure the
    /// file is cut back to its previous length, so a short write or a
    /// failed fsync leaves no partial or unacknowledged record behind.
    pub fn append(&mut self, record: &WorkoutRecord) -> StorageResult<u64> {
        let serialized = record.serialize();
        let offset = self.current_offset;

        if let Err(e) = self.write_synced(&serialized, record) {
            if let Err(rollback) = self.discard_tail() {
                error!(
                    path = %self.storage_path.display(),
                    offset,
                    error = %rollback,
                    "failed to roll back partial append"
                );
            }
            return Err(e);
        }

        self.current_offset += serialized.len() as u64;
        Ok(offset)
    }

    fn write_synced(&mut self, serialized: &[u8], record: &WorkoutRecord) -> StorageResult<()> {
        self.file.write_all(serialized).map_err(|e| {
            StorageError::write_failed(
                format!("Failed to write workout: {}", record.workout_id),
                e,
            )
        })?;

        self.file.sync_all().map_err(|e| {
            StorageError::write_failed(
                format!("fsync failed after writing workout: {}", record.workout_id),
                e,
            )
        })
    }

    /// Truncates anything past the last acknowledged record.
    fn discard_tail(&mut self) -> StorageResult<()> {
        self.file
            .set_len(self.current_offset)
            .and_then(|_| self.file.sync_all())
            .map_err(|e| StorageError::write_failed("Failed to truncate partial record", e))
    }

    /// Replaces the whole file with `records`.
    ///
    /// The writer keeps appending to the new file afterwards.
    pub fn rewrite<'a, I>(&mut self, records: I) -> StorageResult<u64>
    where
        I: IntoIterator<Item = &'a WorkoutRecord>,
    {
        let compact_path = self.storage_path.with_extension(format!("dat.{}", COMPACT_SUFFIX));

        let written = {
            let mut out = File::create(&compact_path).map_err(|e| {
                StorageError::write_failed(
                    format!("Failed to create compaction file: {}", compact_path.display()),
                    e,
                )
            })?;

            let mut written = 0u64;
            for record in records {
                let serialized = record.serialize();
                out.write_all(&serialized).map_err(|e| {
                    StorageError::write_failed("Failed to write compaction file", e)
                })?;
                written += serialized.len() as u64;
            }

            out.sync_all()
                .map_err(|e| StorageError::write_failed("fsync failed on compaction file", e))?;
            written
        };

        fs::rename(&compact_path, &self.storage_path).map_err(|e| {
            StorageError::io_error(
                format!(
                    "Failed to replace {} with compacted file",
                    self.storage_path.display()
                ),
                e,
            )
        })?;

        if let Some(parent) = self.storage_path.parent() {
            // Persist the rename itself; not supported everywhere, so best effort.
            if let Ok(dir) = File::open(parent) {
                let _ = dir.sync_all();
            }
        }

        self.file = open_append(&self.storage_path)?;
        self.current_offset = written;
        Ok(written)
    }
}

fn open_append(path: &Path) -> StorageResult<File> {
    OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            StorageError::write_failed(
                format!("Failed to open storage file: {}", path.display()),
                e,
            )
        })
}
