//! Row presentation for the task list.

use crate::model::task::{Task, TaskId};
use chrono::{DateTime, TimeZone};
use serde::Serialize;

/// `yyyy-MM-dd HH:mm`.
pub const ROW_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Display model for one list row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRow {
    pub id: TaskId,
    /// `"{title} | {category}"`.
    pub title_line: String,
    /// Task date rendered with [`ROW_DATE_FORMAT`].
    pub date_line: String,
}

impl TaskRow {
    pub fn from_task<Tz: TimeZone>(task: &Task, tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            id: task.id,
            title_line: format!("{} | {}", task.title, task.category),
            date_line: format_row_date(task.date, tz),
        }
    }
}

/// Formats epoch milliseconds for a list row.
///
/// Out-of-range timestamps render as an empty string.
pub fn format_row_date<Tz: TimeZone>(epoch_ms: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    DateTime::from_timestamp_millis(epoch_ms)
        .map(|utc| utc.with_timezone(tz).format(ROW_DATE_FORMAT).to_string())
        .unwrap_or_default()
}
