//! Reminder scheduling on top of a `NotificationCenter`.
//!
//! # Invariants
//! - Errors from the center are logged at `warn` and swallowed.
//! - Scheduling the same task twice leaves exactly one pending request.

use super::{NotificationCenter, NotificationContent, NotificationRequest};
use crate::model::task::{notification_identifier, Task, TaskId};
use log::{debug, warn};

/// Title used when the task title is empty.
pub const FALLBACK_TITLE: &str = "(no title)";
/// Body used when the task contents are empty.
pub const FALLBACK_BODY: &str = "(no contents)";

/// Schedules and cancels one reminder per task.
pub struct NotificationScheduler<C: NotificationCenter> {
    center: C,
}

impl<C: NotificationCenter> NotificationScheduler<C> {
    pub fn new(center: C) -> Self {
        Self { center }
    }

    /// Registers a one-shot reminder for task `id`, replacing any previous one.
    ///
    /// Returns whether the host accepted the request.
    pub fn schedule(&self, id: TaskId, fire_at: i64, content: NotificationContent) -> bool {
        let request = NotificationRequest {
            identifier: notification_identifier(id),
            fire_at,
            content,
        };
        match self.center.register(request) {
            Ok(()) => {
                debug!("event=notification_schedule module=notify status=ok task_id={id} fire_at={fire_at}");
                true
            }
            Err(err) => {
                warn!("event=notification_schedule module=notify status=error task_id={id} error={err}");
                false
            }
        }
    }

    /// Schedules the reminder for `task` at its date.
    pub fn schedule_for_task(&self, task: &Task) -> bool {
        self.schedule(task.id, task.date, content_for_task(task))
    }

    /// Removes the pending reminder for task `id`, if any.
    pub fn cancel(&self, id: TaskId) -> bool {
        match self.center.cancel(&notification_identifier(id)) {
            Ok(()) => {
                debug!("event=notification_cancel module=notify status=ok task_id={id}");
                true
            }
            Err(err) => {
                warn!("event=notification_cancel module=notify status=error task_id={id} error={err}");
                false
            }
        }
    }

    /// Returns pending requests, or an empty list when the host fails.
    pub fn pending(&self) -> Vec<NotificationRequest> {
        self.center.list_pending().unwrap_or_else(|err| {
            warn!("event=notification_pending module=notify status=error error={err}");
            Vec::new()
        })
    }

    /// Writes the pending request list to the debug log.
    pub fn log_pending(&self) {
        let pending = self.pending();
        debug!(
            "event=notification_pending module=notify status=ok count={}",
            pending.len()
        );
        for request in &pending {
            debug!(
                "event=notification_pending_item module=notify identifier={} fire_at={}",
                request.identifier, request.fire_at
            );
        }
    }

    pub fn center(&self) -> &C {
        &self.center
    }
}

fn content_for_task(task: &Task) -> NotificationContent {
    let title = if task.title.is_empty() {
        FALLBACK_TITLE.to_string()
    } else {
        task.title.clone()
    };
    let body = if task.contents.is_empty() {
        FALLBACK_BODY.to_string()
    } else {
        task.contents.clone()
    };
    NotificationContent { title, body }
}
