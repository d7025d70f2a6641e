//! Task store facade.
//!
//! # Responsibility
//! - Expose add/update, delete, query and id allocation for tasks.
//! - Emit metadata-only log events for every store operation.
//!
//! # Invariants
//! - The store never caches query results; every `query` reflects the
//!   latest committed state, so callers re-issue it after mutations.
//! - `next_id` is `max(id) + 1`, or 0 for an empty store.

use crate::model::task::{Task, TaskId};
use crate::repo::task_repo::{RepoError, RepoResult, TaskListQuery, TaskRepository};
use log::{debug, info, warn};
use std::time::Instant;

/// Explicitly constructed task store, injected into controllers.
pub struct TaskStore<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskStore<R> {
    /// Creates a store over the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Inserts or replaces the task with the same id in one transaction.
    pub fn add_or_update(&self, task: &Task) -> RepoResult<()> {
        let started_at = Instant::now();
        let result = self.repo.upsert_task(task);
        log_write("task_upsert", task.id, started_at, &result);
        result
    }

    /// Deletes the task with `id`.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when no such task exists.
    pub fn delete(&self, id: TaskId) -> RepoResult<()> {
        let started_at = Instant::now();
        let result = self.repo.delete_task(id);
        log_write("task_delete", id, started_at, &result);
        result
    }

    /// Returns tasks ordered by date ascending.
    ///
    /// `None` or an empty filter lists everything; otherwise only tasks whose
    /// category contains `filter` (case-sensitive) are returned.
    pub fn query(&self, filter: Option<&str>) -> RepoResult<Vec<Task>> {
        let started_at = Instant::now();
        let query = match filter {
            Some(text) => TaskListQuery::category_contains(text),
            None => TaskListQuery::all(),
        };
        let tasks = self.repo.list_tasks(&query)?;
        debug!(
            "event=task_query module=store status=ok filtered={} rows={} duration_ms={}",
            filter.is_some_and(|text| !text.is_empty()),
            tasks.len(),
            started_at.elapsed().as_millis()
        );
        Ok(tasks)
    }

    /// Gets one task by id.
    pub fn get(&self, id: TaskId) -> RepoResult<Option<Task>> {
        self.repo.get_task(id)
    }

    /// Allocates the id for a new, not yet persisted task.
    ///
    /// # Errors
    /// - `RepoError::IdSpaceExhausted` when the largest id is `TaskId::MAX`.
    pub fn next_id(&self) -> RepoResult<TaskId> {
        match self.repo.max_task_id()? {
            None => Ok(0),
            Some(max) => max
                .checked_add(1)
                .ok_or(RepoError::IdSpaceExhausted(max)),
        }
    }
}

fn log_write(event: &str, id: TaskId, started_at: Instant, result: &RepoResult<()>) {
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(()) => info!("event={event} module=store status=ok task_id={id} duration_ms={duration_ms}"),
        Err(err) => warn!(
            "event={event} module=store status=error task_id={id} duration_ms={duration_ms} error={err}"
        ),
    }
}
