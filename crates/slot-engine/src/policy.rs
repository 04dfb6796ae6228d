//! Working hours and buffer defaults.
//!
//! The policy is plain configuration: the engine never assumes a particular
//! working day. Times are written as `"HH:MM"` so policy files stay readable.

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::interval::WorkingWindow;

const DEFAULT_WORK_START: NaiveTime = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
const DEFAULT_WORK_END: NaiveTime = NaiveTime::from_hms_opt(17, 0, 0).unwrap();

/// Scheduling rules applied when resolving a request for a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingPolicy {
    /// Start of the working day (UTC wall clock).
    #[serde(with = "hhmm")]
    pub work_start: NaiveTime,
    /// End of the working day (UTC wall clock).
    #[serde(with = "hhmm")]
    pub work_end: NaiveTime,
    /// Buffer used when a request does not carry its own.
    pub default_buffer_minutes: i64,
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self {
            work_start: DEFAULT_WORK_START,
            work_end: DEFAULT_WORK_END,
            default_buffer_minutes: 0,
        }
    }
}

impl SchedulingPolicy {
    /// Resolve the working window for `date`.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidConfig` if `work_start` is after `work_end`.
    pub fn window_for(&self, date: NaiveDate) -> Result<WorkingWindow> {
        WorkingWindow::new(
            date.and_time(self.work_start).and_utc(),
            date.and_time(self.work_end).and_utc(),
        )
    }

    /// The default buffer as a `Duration`.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidConfig` for a negative buffer.
    pub fn default_buffer(&self) -> Result<Duration> {
        minutes("buffer", self.default_buffer_minutes)
    }
}

/// Convert a minute count into a non-negative `Duration`, naming `field` on failure.
pub(crate) fn minutes(field: &'static str, value: i64) -> Result<Duration> {
    if value < 0 {
        return Err(SlotError::config(
            field,
            format!("must not be negative, got {value} minutes"),
        ));
    }
    Duration::try_minutes(value)
        .ok_or_else(|| SlotError::config(field, format!("{value} minutes is out of range")))
}

/// Parse a `"HH:MM"` (or `"HH:MM:SS"`) wall-clock time.
pub fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_hhmm(&raw)
            .ok_or_else(|| D::Error::custom(format!("expected HH:MM, got `{raw}`")))
    }
}
