//! Task record model.
//!
//! # Responsibility
//! - Define the record shown by the list screen and edited by the form.
//! - Provide the notification identifier derived from the task id.
//!
//! # Invariants
//! - `id` is unique across persisted tasks and never negative.
//! - `date` is Unix epoch milliseconds and drives both sort order and
//!   reminder fire time.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Integer primary key shared by storage and notification scheduling.
pub type TaskId = i64;

/// One task row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub contents: String,
    /// Free text; the search bar matches it by substring.
    pub category: String,
    /// Unix epoch milliseconds.
    pub date: i64,
}

/// Validation error for task records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    NegativeId(TaskId),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeId(id) => write!(f, "task id must not be negative, got {id}"),
        }
    }
}

impl Error for TaskValidationError {}

impl Task {
    /// Creates a blank task with the given id and date.
    ///
    /// Text fields start empty, matching what the edit form shows for a
    /// freshly added task.
    pub fn new(id: TaskId, date: i64) -> Self {
        Self {
            id,
            title: String::new(),
            contents: String::new(),
            category: String::new(),
            date,
        }
    }

    /// Checks invariants that must hold before persistence.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id < 0 {
            return Err(TaskValidationError::NegativeId(self.id));
        }
        Ok(())
    }

    /// Identifier used for the pending reminder of this task.
    pub fn notification_identifier(&self) -> String {
        notification_identifier(self.id)
    }
}

/// Renders a task id as the notification identifier string.
pub fn notification_identifier(id: TaskId) -> String {
    id.to_string()
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    Utc::now().timestamp_millis()
}
