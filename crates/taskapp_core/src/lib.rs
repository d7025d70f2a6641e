//! Core domain logic for TaskApp.
//! This crate owns task persistence, reminder scheduling and the screen
//! controllers; UI shells only render what it hands them.

pub mod controller;
pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod service;

pub use controller::{
    format_row_date, EditController, ListController, ListState, ListView, SaveOutcome, TaskRow,
    ROW_DATE_FORMAT,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{notification_identifier, now_epoch_ms, Task, TaskId, TaskValidationError};
pub use notify::{
    HostNotificationBridge, NotificationCenter, NotificationCommand, NotificationContent,
    NotificationError, NotificationRequest, NotificationResult, NotificationScheduler,
};
pub use repo::task_repo::{
    RepoError, RepoResult, SqliteTaskRepository, TaskListQuery, TaskRepository,
};
pub use service::task_store::TaskStore;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
