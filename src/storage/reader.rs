//! Sequential record reader with strict corruption detection
//!
//! Every read validates the record checksum. The reader never skips a bad
//! record: a checksum failure or truncated tail aborts the scan.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::errors::{StorageError, StorageResult};
use super::record::{WorkoutRecord, MIN_RECORD_SIZE};

/// Forward-only reader over the record file
pub struct StorageReader {
    storage_path: PathBuf,
    reader: BufReader<File>,
    current_offset: u64,
    file_size: u64,
}

impl StorageReader {
    /// Opens the record file for reading.
    pub fn open(storage_path: &Path) -> StorageResult<Self> {
        let file = File::open(storage_path).map_err(|e| {
            StorageError::read_failed(
                format!("Failed to open storage file: {}", storage_path.display()),
                e,
            )
        })?;

        let file_size = file
            .metadata()
            .map_err(|e| StorageError::read_failed("Failed to read file metadata", e))?
            .len();

        Ok(Self {
            storage_path: storage_path.to_path_buf(),
            reader: BufReader::new(file),
            current_offset: 0,
            file_size,
        })
    }

    /// Opens `<data_dir>/data/workouts.dat`.
    pub fn open_from_data_dir(data_dir: &Path) -> StorageResult<Self> {
        Self::open(&super::storage_path(data_dir))
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    pub fn has_more(&self) -> bool {
        self.current_offset < self.file_size
    }

    /// Reads the next record.
    ///
    /// Returns `Ok(None)` at end of file and `FITLOG_DATA_CORRUPTION` for
    /// any checksum failure or truncation.
    pub fn read_next(&mut self) -> StorageResult<Option<WorkoutRecord>> {
        if !self.has_more() {
            return Ok(None);
        }

        let remaining = self.file_size - self.current_offset;
        if remaining < MIN_RECORD_SIZE as u64 {
            return Err(StorageError::corruption_at_offset(
                self.current_offset,
                format!(
                    "Truncated storage: {} bytes remaining, minimum record size is {}",
                    remaining, MIN_RECORD_SIZE
                ),
            ));
        }

        let mut len_buf = [0u8; 4];
        self.reader.read_exact(&mut len_buf).map_err(|e| {
            StorageError::corruption_at_offset(
                self.current_offset,
                format!("Failed to read record length: {}", e),
            )
        })?;
        let record_length = u32::from_le_bytes(len_buf) as u64;

        if record_length < MIN_RECORD_SIZE as u64 || record_length > remaining {
            return Err(StorageError::corruption_at_offset(
                self.current_offset,
                format!(
                    "Invalid record length {} ({} bytes remaining)",
                    record_length, remaining
                ),
            ));
        }

        let mut record_buf = vec![0u8; record_length as usize];
        record_buf[0..4].copy_from_slice(&len_buf);
        self.reader.read_exact(&mut record_buf[4..]).map_err(|e| {
            StorageError::corruption_at_offset(
                self.current_offset,
                format!("Failed to read record body: {}", e),
            )
        })?;

        let (record, consumed) = WorkoutRecord::deserialize(&record_buf)
            .map_err(|e| StorageError::corruption_at_offset(self.current_offset, e.to_string()))?;

        self.current_offset += consumed as u64;
        Ok(Some(record))
    }

    /// Reads every remaining record. Any corruption fails the whole read.
    pub fn read_all(&mut self) -> StorageResult<Vec<WorkoutRecord>> {
        let mut records = Vec::new();
        while let Some(record) = self.read_next()? {
            records.push(record);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageWriter;
    use crate::workout::WorkoutId;
    use std::fs;
    use tempfile::TempDir;

    fn tombstone() -> WorkoutRecord {
        WorkoutRecord::tombstone(WorkoutId::generate())
    }

    #[test]
    fn test_read_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let writer = StorageWriter::open(temp_dir.path()).unwrap();

        let mut reader = StorageReader::open(writer.path()).unwrap();
        assert!(reader.read_next().unwrap().is_none());
    }

    #[test]
    fn test_reads_in_file_order() {
        let temp_dir = TempDir::new().unwrap();
        let first = tombstone();
        let second = tombstone();
        {
            let mut writer = StorageWriter::open(temp_dir.path()).unwrap();
            writer.append(&first).unwrap();
            writer.append(&second).unwrap();
        }

        let mut reader = StorageReader::open_from_data_dir(temp_dir.path()).unwrap();
        let records = reader.read_all().unwrap();
        assert_eq!(records, vec![first, second]);
        assert!(!reader.has_more());
    }

    #[test]
    fn test_truncated_tail_is_corruption() {
        let temp_dir = TempDir::new().unwrap();
        let path = {
            let mut writer = StorageWriter::open(temp_dir.path()).unwrap();
            writer.append(&tombstone()).unwrap();
            writer.path().to_path_buf()
        };

        let mut contents = fs::read(&path).unwrap();
        contents.truncate(contents.len() - 3);
        fs::write(&path, contents).unwrap();

        let mut reader = StorageReader::open(&path).unwrap();
        let err = reader.read_all().unwrap_err();
        assert!(err.is_fatal());
    }
}
