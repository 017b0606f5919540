//! # Response Envelope
//!
//! Every API response, success or failure, uses the same shape:
//!
//! ```text
//! { success: bool, data?, message?, error?, count? }
//! ```
//!
//! Absent fields are omitted from the JSON.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> Envelope<T> {
    /// Success carrying `data`
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
            count: None,
        }
    }

    /// Success carrying `data` and a confirmation message
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }

    /// Failure with a user-presentable reason
    pub fn error(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(reason.into()),
            count: None,
        }
    }
}

impl<T> Envelope<Vec<T>> {
    /// Success carrying a sequence and its length
    pub fn list(items: Vec<T>) -> Self {
        Self {
            count: Some(items.len()),
            ..Self::ok(items)
        }
    }
}
