//! Turn raw busy intervals into buffered, merged, time-ordered blocks.
//!
//! Every raw interval is widened by `buffer` on both sides, the widened
//! intervals are sorted, and overlapping or touching ones are coalesced in a
//! single left-to-right pass.

use chrono::Duration;

use crate::error::{Result, SlotError};
use crate::interval::TimeInterval;

/// Buffer, sort and merge a day's busy intervals.
///
/// Input may be unsorted and overlapping. The output is sorted by start and no
/// two intervals in it overlap or touch. Zero-length raw intervals are dropped.
///
/// # Errors
/// Returns `SlotError::InvalidConfig` for a negative `buffer`, or when buffering
/// pushes a timestamp out of range.
/// Returns `SlotError::InvalidInterval` for any interval whose end precedes its
/// start; validation happens before any merging.
pub fn normalize(raw: &[TimeInterval], buffer: Duration) -> Result<Vec<TimeInterval>> {
    if buffer < Duration::zero() {
        return Err(SlotError::config(
            "buffer",
            format!("must not be negative, got {} minutes", buffer.num_minutes()),
        ));
    }

    for (index, interval) in raw.iter().enumerate() {
        if interval.end < interval.start {
            return Err(SlotError::InvalidInterval {
                index,
                start: interval.start,
                end: interval.end,
            });
        }
    }

    let mut buffered: Vec<TimeInterval> = Vec::with_capacity(raw.len());
    for interval in raw.iter().filter(|i| !i.is_empty()) {
        let start = interval
            .start
            .checked_sub_signed(buffer)
            .ok_or_else(|| SlotError::config("buffer", "buffered start is out of range"))?;
        let end = interval
            .end
            .checked_add_signed(buffer)
            .ok_or_else(|| SlotError::config("buffer", "buffered end is out of range"))?;
        buffered.push(TimeInterval { start, end });
    }

    buffered.sort_by_key(|i| (i.start, i.end));

    let mut merged: Vec<TimeInterval> = Vec::with_capacity(buffered.len());
    for interval in buffered {
        if let Some(last) = merged.last_mut() {
            if interval.start <= last.end {
                last.end = last.end.max(interval.end);
                continue;
            }
        }
        merged.push(interval);
    }

    tracing::debug!(
        raw = raw.len(),
        blocked = merged.len(),
        buffer_minutes = buffer.num_minutes(),
        "normalized busy intervals"
    );

    Ok(merged)
}

