//! Workout record format
//!
//! ```text
//! +------------------+
//! | Record Length    | (u32 LE, whole record including this field)
//! +------------------+
//! | Workout ID       | (length-prefixed UTF-8)
//! +------------------+
//! | Tombstone Flag   | (u8: 0 = live, 1 = deleted)
//! +------------------+
//! | Body             | (length-prefixed JSON bytes, empty for tombstones)
//! +------------------+
//! | Checksum         | (u32 LE)
//! +------------------+
//! ```
//!
//! The checksum covers every byte before it.

use std::io::{self, Cursor, Read};

use super::checksum::{compute_checksum, verify_checksum};
use super::errors::{StorageError, StorageResult};
use crate::workout::{Workout, WorkoutId};

/// len + id len + tombstone + body len + checksum
pub(crate) const MIN_RECORD_SIZE: usize = 4 + 4 + 1 + 4 + 4;

/// One entry of the record file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutRecord {
    pub workout_id: String,
    pub is_tombstone: bool,
    /// JSON-encoded [`Workout`]; empty for tombstones
    pub body: Vec<u8>,
}

impl WorkoutRecord {
    /// Live record carrying the full workout
    pub fn live(workout: &Workout) -> serde_json::Result<Self> {
        Ok(Self {
            workout_id: workout.id.to_string(),
            is_tombstone: false,
            body: serde_json::to_vec(workout)?,
        })
    }

    /// Deletion marker for `id`
    pub fn tombstone(id: WorkoutId) -> Self {
        Self {
            workout_id: id.to_string(),
            is_tombstone: true,
            body: Vec::new(),
        }
    }

    /// Decodes the body of a live record.
    ///
    /// A body that does not decode, or whose id disagrees with the record
    /// header, is corruption.
    pub fn decode_workout(&self) -> StorageResult<Workout> {
        let workout: Workout = serde_json::from_slice(&self.body).map_err(|e| {
            StorageError::corruption_for_workout(
                &self.workout_id,
                format!("Undecodable workout body: {}", e),
            )
        })?;

        if workout.id.to_string() != self.workout_id {
            return Err(StorageError::corruption_for_workout(
                &self.workout_id,
                format!("Body carries mismatched id {}", workout.id),
            ));
        }

        Ok(workout)
    }

    pub fn id(&self) -> StorageResult<WorkoutId> {
        self.workout_id.parse().map_err(|e| {
            StorageError::corruption_for_workout(
                &self.workout_id,
                format!("Invalid workout id: {}", e),
            )
        })
    }

    /// Serializes the complete record.
    pub fn serialize(&self) -> Vec<u8> {
        let body_len = 4 + self.workout_id.len() + 1 + 4 + self.body.len();
        let record_length = (4 + body_len + 4) as u32;

        let mut record = Vec::with_capacity(record_length as usize);
        record.extend_from_slice(&record_length.to_le_bytes());

        record.extend_from_slice(&(self.workout_id.len() as u32).to_le_bytes());
        record.extend_from_slice(self.workout_id.as_bytes());

        record.push(u8::from(self.is_tombstone));

        record.extend_from_slice(&(self.body.len() as u32).to_le_bytes());
        record.extend_from_slice(&self.body);

        let checksum = compute_checksum(&record);
        record.extend_from_slice(&checksum.to_le_bytes());

        record
    }

    /// Deserializes a record from bytes, verifying its checksum.
    ///
    /// Returns the record and the number of bytes consumed.
    pub fn deserialize(data: &[u8]) -> io::Result<(Self, usize)> {
        if data.len() < MIN_RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "Record too short",
            ));
        }

        let record_length = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;

        if record_length < MIN_RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid record length: {}", record_length),
            ));
        }

        if data.len() < record_length {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "Record truncated: expected {} bytes, got {}",
                    record_length,
                    data.len()
                ),
            ));
        }

        let checksum_offset = record_length - 4;
        let mut stored = [0u8; 4];
        stored.copy_from_slice(&data[checksum_offset..record_length]);
        let stored_checksum = u32::from_le_bytes(stored);

        if !verify_checksum(&data[..checksum_offset], stored_checksum) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Checksum mismatch: stored {:08x}", stored_checksum),
            ));
        }

        let mut cursor = Cursor::new(&data[4..checksum_offset]);

        let id_bytes = read_prefixed(&mut cursor)?;
        let workout_id = String::from_utf8(id_bytes).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("Invalid UTF-8: {}", e))
        })?;

        let mut flag = [0u8; 1];
        cursor.read_exact(&mut flag)?;
        let is_tombstone = match flag[0] {
            0 => false,
            1 => true,
            other => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Invalid tombstone flag: {}", other),
                ))
            }
        };

        let body = read_prefixed(&mut cursor)?;

        if cursor.position() as usize != checksum_offset - 4 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Trailing bytes inside record",
            ));
        }

        Ok((
            Self {
                workout_id,
                is_tombstone,
                body,
            },
            record_length,
        ))
    }
}

fn read_prefixed<R: Read>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf)?;
    let len = u32::from_le_bytes(len_buf) as usize;

    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}
