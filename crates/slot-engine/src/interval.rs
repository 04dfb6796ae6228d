//! Value types shared by the normalizer and the sweeper.
//!
//! All timestamps are `DateTime<Utc>`; callers resolve their local offset
//! before handing intervals to the engine.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// A half-open time range `[start, end)`.
///
/// A zero-length interval is degenerate and blocks nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeInterval {
    /// Build an interval, rejecting `end < start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end < start {
            return Err(SlotError::InvalidInterval {
                index: 0,
                start,
                end,
            });
        }
        Ok(Self { start, end })
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True when the two ranges share at least one instant.
    ///
    /// Touching ranges (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// The span of one day inside which slots may be suggested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl WorkingWindow {
    /// Build a window, rejecting `start > end`. A zero-length window is allowed
    /// and simply has no room for any slot.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        let window = Self { start, end };
        window.validate()?;
        Ok(window)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.start > self.end {
            return Err(SlotError::config(
                "window",
                format!("start {} is after end {}", self.start, self.end),
            ));
        }
        Ok(())
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// A suggested start time. The slot spans `[start, start + duration_needed)`
/// for whatever duration it was computed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FreeSlot {
    pub start: DateTime<Utc>,
}

impl FreeSlot {
    /// The full range this slot reserves for a task of `duration_needed`.
    pub fn span(&self, duration_needed: Duration) -> TimeInterval {
        TimeInterval {
            start: self.start,
            end: self.start + duration_needed,
        }
    }

    /// ISO-8601 / RFC 3339 form used on the wire, e.g. `2026-03-16T09:00:00+00:00`.
    pub fn to_rfc3339(&self) -> String {
        self.start.to_rfc3339_opts(SecondsFormat::Secs, false)
    }
}
