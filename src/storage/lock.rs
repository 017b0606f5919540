//! Exclusive ownership of a data directory
//!
//! A `<data_dir>/.lock` file marks a directory as owned by a running
//! process. It is created atomically and removed when the owner drops.
//! A process killed without cleanup leaves the file behind; it must then
//! be removed by hand.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use super::errors::{StorageError, StorageResult};

/// Lock file name inside the data directory
pub const LOCK_FILE: &str = ".lock";

/// Returns `<data_dir>/.lock`
pub fn lock_path(data_dir: &Path) -> PathBuf {
    data_dir.join(LOCK_FILE)
}

/// Held for as long as a store owns the directory
#[derive(Debug)]
pub struct DataDirLock {
    path: PathBuf,
}

impl DataDirLock {
    /// Takes the lock, failing with `FITLOG_DATA_DIR_LOCKED` if another
    /// owner holds it.
    pub fn acquire(data_dir: &Path) -> StorageResult<Self> {
        fs::create_dir_all(data_dir).map_err(|e| {
            StorageError::write_failed(
                format!("Failed to create data directory: {}", data_dir.display()),
                e,
            )
        })?;

        let path = lock_path(data_dir);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(StorageError::data_dir_locked(&path));
            }
            Err(e) => {
                return Err(StorageError::io_error(
                    format!("Failed to create lock file: {}", path.display()),
                    e,
                ));
            }
        };

        // Informational only; ownership is the file's existence.
        let _ = writeln!(file, "{}", std::process::id());

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for DataDirLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %e, "failed to remove lock file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageErrorCode;
    use tempfile::TempDir;

    #[test]
    fn test_second_acquire_fails_until_release() {
        let temp_dir = TempDir::new().unwrap();

        let first = DataDirLock::acquire(temp_dir.path()).unwrap();
        assert!(first.path().exists());

        let err = DataDirLock::acquire(temp_dir.path()).unwrap_err();
        assert_eq!(err.code(), StorageErrorCode::DataDirLocked);
        assert!(!err.is_fatal());

        drop(first);
        assert!(!lock_path(temp_dir.path()).exists());
        DataDirLock::acquire(temp_dir.path()).unwrap();
    }

    #[test]
    fn test_stale_lock_file_blocks() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(lock_path(temp_dir.path()), "12345\n").unwrap();

        let err = DataDirLock::acquire(temp_dir.path()).unwrap_err();
        assert_eq!(err.code(), StorageErrorCode::DataDirLocked);
        assert!(err.to_string().contains(".lock"));
    }
}
