//! Sweep a working window for gaps that can host a task.
//!
//! A single forward-only cursor walks the blocked intervals in order. Each gap
//! between the cursor and the next block yields at most one slot, placed at the
//! cursor; the tail between the last block and the window end is checked last.

use chrono::Duration;

use crate::error::{Result, SlotError};
use crate::interval::{FreeSlot, TimeInterval, WorkingWindow};

/// Find every gap in `window` at least `duration_needed` long.
///
/// `blocked` must already be sorted by start, as produced by
/// [`normalize`](crate::normalize::normalize). The sweeper never re-sorts; an
/// unsorted input is a caller bug and trips a debug assertion.
///
/// Blocks that start after the window ends are ignored. A block that ends
/// before the cursor (for example a duplicate) never moves the cursor back.
///
/// # Errors
/// Returns `SlotError::InvalidConfig` when `duration_needed` is not positive or
/// when the window starts after it ends.
pub fn find_free_slots(
    blocked: &[TimeInterval],
    window: &WorkingWindow,
    duration_needed: Duration,
) -> Result<Vec<FreeSlot>> {
    if duration_needed <= Duration::zero() {
        return Err(SlotError::config(
            "duration_needed",
            format!("must be positive, got {} minutes", duration_needed.num_minutes()),
        ));
    }
    window.validate()?;

    debug_assert!(
        blocked.windows(2).all(|pair| pair[0].start <= pair[1].start),
        "blocked intervals must be sorted by start"
    );

    let mut slots = Vec::new();
    let mut cursor = window.start;

    for block in blocked {
        if block.start > window.end {
            continue;
        }
        if block.start - cursor >= duration_needed {
            tracing::trace!(start = %cursor, "free slot before block");
            slots.push(FreeSlot { start: cursor });
        }
        cursor = cursor.max(block.end);
    }

    if window.end - cursor >= duration_needed {
        tracing::trace!(start = %cursor, "free slot at end of window");
        slots.push(FreeSlot { start: cursor });
    }

    tracing::debug!(
        blocked = blocked.len(),
        slots = slots.len(),
        duration_minutes = duration_needed.num_minutes(),
        "swept working window"
    );

    Ok(slots)
}

/// Find the earliest slot of at least `duration_needed` within the window.
///
/// Delegates to [`find_free_slots`] and returns its first result.
pub fn first_free_slot(
    blocked: &[TimeInterval],
    window: &WorkingWindow,
    duration_needed: Duration,
) -> Result<Option<FreeSlot>> {
    Ok(find_free_slots(blocked, window, duration_needed)?
        .into_iter()
        .next())
}
