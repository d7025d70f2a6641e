//! Task edit form controller.
//!
//! # Invariants
//! - Nothing is persisted until `save`.
//! - A store failure skips reminder scheduling; a scheduling failure never
//!   fails the save.

use crate::model::task::Task;
use crate::notify::{NotificationCenter, NotificationScheduler};
use crate::repo::task_repo::{RepoResult, TaskRepository};
use crate::service::task_store::TaskStore;
use log::info;

/// Result of a successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    /// Whether the host accepted the reminder.
    pub reminder_scheduled: bool,
}

/// Form state for one task, either freshly added or selected from the list.
#[derive(Debug, Clone)]
pub struct EditController {
    task: Task,
}

impl EditController {
    pub fn new(task: Task) -> Self {
        Self { task }
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.task.title = title.into();
    }

    pub fn set_contents(&mut self, contents: impl Into<String>) {
        self.task.contents = contents.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.task.category = category.into();
    }

    /// Sets the task date (epoch milliseconds), which is also the reminder time.
    pub fn set_date(&mut self, date: i64) {
        self.task.date = date;
    }

    /// Persists the task, then schedules its reminder.
    pub fn save<R, C>(
        &self,
        store: &TaskStore<R>,
        scheduler: &NotificationScheduler<C>,
    ) -> RepoResult<SaveOutcome>
    where
        R: TaskRepository,
        C: NotificationCenter,
    {
        store.add_or_update(&self.task)?;
        let reminder_scheduled = scheduler.schedule_for_task(&self.task);
        info!(
            "event=task_save module=edit status=ok task_id={} reminder_scheduled={}",
            self.task.id, reminder_scheduled
        );
        Ok(SaveOutcome { reminder_scheduled })
    }

    pub fn into_task(self) -> Task {
        self.task
    }
}
