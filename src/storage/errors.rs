//! Storage error types
//!
//! Error codes:
//! - FITLOG_STORAGE_IO_ERROR (ERROR)
//! - FITLOG_STORAGE_WRITE_FAILED (ERROR)
//! - FITLOG_STORAGE_READ_FAILED (ERROR)
//! - FITLOG_DATA_DIR_LOCKED (ERROR)
//! - FITLOG_DATA_CORRUPTION (FATAL)

use std::fmt;
use std::io;

/// Severity levels for storage errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation fails, server continues
    Error,
    /// The data file cannot be trusted; the store must not be served
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Storage-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorCode {
    /// Disk I/O failure
    IoError,
    /// Record write or fsync failed
    WriteFailed,
    /// Record read failed
    ReadFailed,
    /// Another process holds the data directory lock
    DataDirLocked,
    /// Checksum mismatch, truncation or undecodable record
    DataCorruption,
}

impl StorageErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            StorageErrorCode::IoError => "FITLOG_STORAGE_IO_ERROR",
            StorageErrorCode::WriteFailed => "FITLOG_STORAGE_WRITE_FAILED",
            StorageErrorCode::ReadFailed => "FITLOG_STORAGE_READ_FAILED",
            StorageErrorCode::DataDirLocked => "FITLOG_DATA_DIR_LOCKED",
            StorageErrorCode::DataCorruption => "FITLOG_DATA_CORRUPTION",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            StorageErrorCode::DataCorruption => Severity::Fatal,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for StorageErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Storage error with code, message and optional context
#[derive(Debug)]
pub struct StorageError {
    code: StorageErrorCode,
    message: String,
    details: Option<String>,
    source: Option<io::Error>,
}

impl StorageError {
    fn new(code: StorageErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            source: None,
        }
    }

    fn with_source(mut self, source: io::Error) -> Self {
        self.source = Some(source);
        self
    }

    pub fn io_error(message: impl Into<String>, source: io::Error) -> Self {
        Self::new(StorageErrorCode::IoError, message).with_source(source)
    }

    pub fn write_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self::new(StorageErrorCode::WriteFailed, message).with_source(source)
    }

    pub fn read_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self::new(StorageErrorCode::ReadFailed, message).with_source(source)
    }

    /// The lock file already exists, so another process owns the directory
    pub fn data_dir_locked(lock_path: &std::path::Path) -> Self {
        let mut err = Self::new(
            StorageErrorCode::DataDirLocked,
            "Data directory is in use by another fitlog process",
        );
        err.details = Some(format!(
            "lock_file: {}, remove it if no fitlog process is running",
            lock_path.display()
        ));
        err
    }

    pub fn data_corruption(message: impl Into<String>) -> Self {
        Self::new(StorageErrorCode::DataCorruption, message)
    }

    /// Corruption found at a byte offset of the record file
    pub fn corruption_at_offset(offset: u64, reason: impl Into<String>) -> Self {
        let mut err = Self::data_corruption(reason);
        err.details = Some(format!("byte_offset: {}", offset));
        err
    }

    /// A record passed its checksum but its body does not decode
    pub fn corruption_for_workout(workout_id: &str, reason: impl Into<String>) -> Self {
        let mut err = Self::data_corruption(reason);
        err.details = Some(format!("workout_id: {}", workout_id));
        err
    }

    pub fn code(&self) -> StorageErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity(), self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        if let Some(ref source) = self.source {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_corruption_is_fatal() {
        assert!(StorageError::data_corruption("checksum mismatch").is_fatal());
        let err = StorageError::write_failed("disk full", io::Error::other("disk full"));
        assert!(!err.is_fatal());
        assert_eq!(err.code().code(), "FITLOG_STORAGE_WRITE_FAILED");
    }

    #[test]
    fn test_display_carries_context() {
        let display = StorageError::corruption_at_offset(1024, "checksum mismatch").to_string();
        assert!(display.contains("FITLOG_DATA_CORRUPTION"));
        assert!(display.contains("FATAL"));
        assert!(display.contains("byte_offset: 1024"));
    }
}
