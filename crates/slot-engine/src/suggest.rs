//! Compose normalization and sweeping into a single suggestion call.
//!
//! [`suggest`] is the pure entry point. [`Scheduler`] wraps it with a
//! [`BusySource`] and a [`SchedulingPolicy`] so that a request carrying a user
//! id and a date string can be answered end to end.
//!
//! The buffer is applied twice: once around every busy interval, and once more
//! on top of the requested duration. A slot therefore leaves breathing room
//! both after the existing booking and after the new task.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{Result, SlotError};
use crate::interval::{FreeSlot, TimeInterval, WorkingWindow};
use crate::normalize::normalize;
use crate::policy::{minutes, SchedulingPolicy};
use crate::source::BusySource;
use crate::sweep::find_free_slots;

/// Suggest start times for a task of `duration_requested` inside `window`.
///
/// Equivalent to
/// `find_free_slots(normalize(raw, buffer)?, window, duration_requested + buffer)`.
///
/// # Errors
/// Returns `SlotError::InvalidConfig` for a non-positive `duration_requested`,
/// a negative `buffer` or an inverted window, and `SlotError::InvalidInterval`
/// for a malformed raw interval.
pub fn suggest(
    raw: &[TimeInterval],
    buffer: Duration,
    duration_requested: Duration,
    window: &WorkingWindow,
) -> Result<Vec<FreeSlot>> {
    if duration_requested <= Duration::zero() {
        return Err(SlotError::config(
            "duration_requested",
            format!("must be positive, got {} minutes", duration_requested.num_minutes()),
        ));
    }
    let blocked = normalize(raw, buffer)?;
    let duration_needed = duration_requested
        .checked_add(&buffer)
        .ok_or_else(|| SlotError::config("duration_requested", "duration plus buffer overflows"))?;
    find_free_slots(&blocked, window, duration_needed)
}

/// A suggestion request as received over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestRequest {
    pub user_id: String,
    /// Calendar day, formatted `YYYY-MM-DD`.
    pub date_str: String,
    pub duration_minutes: i64,
    /// Falls back to the policy's default buffer when absent.
    #[serde(default)]
    pub buffer_minutes: Option<i64>,
}

/// The suggestion response: a human-readable summary and ISO-8601 start times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub message: String,
    pub suggested_slots: Vec<String>,
}

impl SuggestResponse {
    pub fn from_slots(slots: &[FreeSlot]) -> Self {
        let noun = if slots.len() == 1 { "slot" } else { "slots" };
        Self {
            message: format!("Found {} suggested time {}.", slots.len(), noun),
            suggested_slots: slots.iter().map(FreeSlot::to_rfc3339).collect(),
        }
    }
}

/// Failure of a [`Scheduler`] call: either bad input or a failing source.
#[derive(Error, Debug)]
pub enum ScheduleError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Slot(#[from] SlotError),

    #[error("Busy source error: {0}")]
    Source(#[source] E),
}

/// Answers [`SuggestRequest`]s against a busy-interval source.
#[derive(Debug, Clone)]
pub struct Scheduler<S> {
    source: S,
    policy: SchedulingPolicy,
}

impl<S: BusySource> Scheduler<S> {
    pub fn new(source: S, policy: SchedulingPolicy) -> Self {
        Self { source, policy }
    }

    pub fn policy(&self) -> &SchedulingPolicy {
        &self.policy
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Resolve the day, fetch its busy intervals and suggest slots.
    pub fn suggest(
        &self,
        request: &SuggestRequest,
    ) -> std::result::Result<SuggestResponse, ScheduleError<S::Error>> {
        let slots = self.suggest_slots(request)?;
        Ok(SuggestResponse::from_slots(&slots))
    }

    /// Like [`Scheduler::suggest`] but returns the raw slots.
    pub fn suggest_slots(
        &self,
        request: &SuggestRequest,
    ) -> std::result::Result<Vec<FreeSlot>, ScheduleError<S::Error>> {
        let date = NaiveDate::parse_from_str(&request.date_str, "%Y-%m-%d").map_err(|e| {
            SlotError::config(
                "date_str",
                format!("expected YYYY-MM-DD, got `{}`: {e}", request.date_str),
            )
        })?;
        let buffer = match request.buffer_minutes {
            Some(value) => minutes("buffer", value)?,
            None => self.policy.default_buffer()?,
        };
        let duration = minutes("duration_requested", request.duration_minutes)?;
        let window = self.policy.window_for(date)?;

        let busy = self
            .source
            .fetch_busy_intervals(&request.user_id, date)
            .map_err(ScheduleError::Source)?;

        let slots = suggest(&busy, buffer, duration, &window)?;
        tracing::info!(
            user_id = %request.user_id,
            date = %date,
            busy = busy.len(),
            slots = slots.len(),
            "suggested free slots"
        );
        Ok(slots)
    }
}
