//! Error types for slot-engine operations.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Input validation failures. These are deterministic: retrying with the same
/// input yields the same error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    /// A raw busy interval ends before it starts.
    #[error("Invalid interval at index {index}: start {start} is after end {end}")]
    InvalidInterval {
        index: usize,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// A configuration value (buffer, duration, window, date) is out of range.
    #[error("Invalid config `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl SlotError {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        SlotError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }

    /// The name of the offending field, or `"intervals"` for a malformed interval.
    pub fn field(&self) -> &'static str {
        match self {
            SlotError::InvalidInterval { .. } => "intervals",
            SlotError::InvalidConfig { field, .. } => field,
        }
    }
}

pub type Result<T> = std::result::Result<T, SlotError>;
