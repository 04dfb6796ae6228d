//! Where busy intervals come from.
//!
//! The engine itself never performs I/O. Anything that can list a user's
//! booked intervals for one day implements [`BusySource`] and is handed to a
//! [`Scheduler`](crate::suggest::Scheduler). [`TaskBook`] is the in-memory
//! implementation used by the CLI and the tests.

use std::path::Path;

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::interval::TimeInterval;

/// A collaborator that lists booked intervals for one user on one UTC day.
pub trait BusySource {
    type Error: std::error::Error + 'static;

    /// Return every interval booked for `user_id` that overlaps `date`.
    fn fetch_busy_intervals(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> std::result::Result<Vec<TimeInterval>, Self::Error>;
}

/// A booked task, shaped like a row of a `tasks` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
}

impl TaskRecord {
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            start_time: Some(start_time),
            end_time: Some(end_time),
        }
    }

    /// The booked range, or `None` if either bound is missing.
    pub fn interval(&self) -> Option<TimeInterval> {
        Some(TimeInterval {
            start: self.start_time?,
            end: self.end_time?,
        })
    }
}

/// Errors raised by [`TaskBook`].
#[derive(Error, Debug)]
pub enum TaskBookError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Task '{name}' already exists for user '{user_id}'")]
    Duplicate { user_id: String, name: String },

    #[error("Task '{name}' not found for user '{user_id}'")]
    NotFound { user_id: String, name: String },

    #[error("Task '{name}' ends before it starts")]
    Inverted { name: String },
}

/// An in-memory list of tasks, persisted as a JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskBook {
    tasks: Vec<TaskRecord>,
}

impl TaskBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<TaskRecord>) -> Self {
        Self { tasks }
    }

    pub fn from_json(json: &str) -> Result<Self, TaskBookError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a task book from a JSON file. A missing file yields an empty book.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TaskBookError> {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TaskBookError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn tasks(&self) -> &[TaskRecord] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Add a task. Names are unique per user.
    pub fn insert(&mut self, task: TaskRecord) -> Result<(), TaskBookError> {
        if let Some(interval) = task.interval() {
            if interval.end < interval.start {
                return Err(TaskBookError::Inverted { name: task.name });
            }
        }
        if self.position(&task.user_id, &task.name).is_some() {
            return Err(TaskBookError::Duplicate {
                user_id: task.user_id,
                name: task.name,
            });
        }
        self.tasks.push(task);
        Ok(())
    }

    /// Move an existing task to a new time range.
    pub fn update(
        &mut self,
        user_id: &str,
        name: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<(), TaskBookError> {
        if end_time < start_time {
            return Err(TaskBookError::Inverted {
                name: name.to_string(),
            });
        }
        let index = self.position(user_id, name).ok_or_else(|| not_found(user_id, name))?;
        let task = &mut self.tasks[index];
        task.start_time = Some(start_time);
        task.end_time = Some(end_time);
        Ok(())
    }

    /// Remove a task by name, returning it.
    pub fn remove(&mut self, user_id: &str, name: &str) -> Result<TaskRecord, TaskBookError> {
        let index = self.position(user_id, name).ok_or_else(|| not_found(user_id, name))?;
        Ok(self.tasks.remove(index))
    }

    fn position(&self, user_id: &str, name: &str) -> Option<usize> {
        self.tasks
            .iter()
            .position(|t| t.user_id == user_id && t.name == name)
    }
}

fn not_found(user_id: &str, name: &str) -> TaskBookError {
    TaskBookError::NotFound {
        user_id: user_id.to_string(),
        name: name.to_string(),
    }
}

impl BusySource for TaskBook {
    type Error = TaskBookError;

    fn fetch_busy_intervals(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<TimeInterval>, TaskBookError> {
        let day_start = date.and_time(NaiveTime::MIN).and_utc();
        let day_end = date
            .checked_add_days(Days::new(1))
            .map(|next| next.and_time(NaiveTime::MIN).and_utc())
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let mut intervals = Vec::new();
        for task in self.tasks.iter().filter(|t| t.user_id == user_id) {
            let Some(interval) = task.interval() else {
                tracing::warn!(task = %task.name, "skipping task without start or end time");
                continue;
            };
            if interval.end < interval.start {
                return Err(TaskBookError::Inverted {
                    name: task.name.clone(),
                });
            }
            if interval.start < day_end && interval.end > day_start {
                intervals.push(interval);
            }
        }

        tracing::debug!(user_id, %date, busy = intervals.len(), "fetched busy intervals");
        Ok(intervals)
    }
}
