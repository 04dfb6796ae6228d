//! # slot-engine
//!
//! Deterministic free-slot suggestion for a single user and a single day.
//!
//! Given the intervals a user is already booked for, the engine pads each one
//! with buffer time, merges the result into non-overlapping blocks, and sweeps
//! the working window for gaps long enough to host a new task plus its buffer.
//!
//! ## Modules
//!
//! - [`interval`] — Value types: busy intervals, working windows, free slots
//! - [`normalize`] — Buffer, sort and merge raw busy intervals
//! - [`sweep`] — Walk the working window and emit gaps that fit
//! - [`suggest`] — Compose the two steps; request/response wire types
//! - [`source`] — Busy-interval collaborator trait and an in-memory task book
//! - [`policy`] — Working hours and default buffer configuration
//! - [`error`] — Error types

pub mod error;
pub mod interval;
pub mod normalize;
pub mod policy;
pub mod source;
pub mod suggest;
pub mod sweep;

pub use error::{Result, SlotError};
pub use interval::{FreeSlot, TimeInterval, WorkingWindow};
pub use normalize::normalize;
pub use policy::SchedulingPolicy;
pub use source::{BusySource, TaskBook, TaskRecord};
pub use suggest::{suggest, ScheduleError, Scheduler, SuggestRequest, SuggestResponse};
pub use sweep::{find_free_slots, first_free_slot};
