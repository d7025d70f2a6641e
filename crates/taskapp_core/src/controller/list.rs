//! Task list screen controller.
//!
//! # Responsibility
//! - Keep the visible rows in sync with the store for the current filter.
//! - Handle row selection, add, swipe-delete and search text events.
//!
//! # Invariants
//! - Rows are always ordered by task date ascending.
//! - Delete order is: cancel reminder, delete from store, remove row.
//! - A failed store call leaves the visible rows unchanged.

use crate::controller::row::TaskRow;
use crate::model::task::Task;
use crate::notify::{NotificationCenter, NotificationScheduler};
use crate::repo::task_repo::{RepoError, RepoResult, TaskRepository};
use crate::service::task_store::TaskStore;
use chrono::{FixedOffset, Local, Offset};
use log::{info, warn};

/// Callbacks the list UI registers with the controller.
pub trait ListView {
    /// Replaces every visible row.
    fn reload(&mut self, rows: &[TaskRow]);
    /// Removes one row after a successful delete.
    fn remove_row(&mut self, index: usize);
    /// Shows a recoverable error to the user.
    fn show_error(&mut self, message: &str);
}

/// Filter state of the list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListState {
    /// Showing every task.
    #[default]
    Idle,
    /// Showing tasks whose category contains the search text.
    Filtered(String),
}

impl ListState {
    fn filter(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Filtered(text) => Some(text.as_str()),
        }
    }
}

/// Drives the task list screen from store queries and user events.
pub struct ListController<'a, R, C, V>
where
    R: TaskRepository,
    C: NotificationCenter,
    V: ListView,
{
    store: &'a TaskStore<R>,
    scheduler: &'a NotificationScheduler<C>,
    view: V,
    state: ListState,
    tasks: Vec<Task>,
    display_offset: FixedOffset,
}

impl<'a, R, C, V> ListController<'a, R, C, V>
where
    R: TaskRepository,
    C: NotificationCenter,
    V: ListView,
{
    /// Wires the controller to its collaborators; rows render in local time.
    pub fn new(store: &'a TaskStore<R>, scheduler: &'a NotificationScheduler<C>, view: V) -> Self {
        Self {
            store,
            scheduler,
            view,
            state: ListState::Idle,
            tasks: Vec::new(),
            display_offset: Local::now().offset().fix(),
        }
    }

    /// Overrides the offset used to render row dates.
    pub fn with_display_offset(mut self, offset: FixedOffset) -> Self {
        self.display_offset = offset;
        self
    }

    /// Shows every task, ordered by date.
    pub fn load(&mut self) -> RepoResult<()> {
        self.refresh_with(ListState::Idle)
    }

    /// Re-renders from the store when the screen becomes visible again.
    pub fn on_appear(&mut self) -> RepoResult<()> {
        self.refresh_with(self.state.clone())
    }

    /// Applies search bar text: empty shows all, anything else filters by
    /// category substring.
    ///
    /// A failed query keeps the previous state and rows.
    pub fn set_search_text(&mut self, text: &str) -> RepoResult<()> {
        let state = if text.is_empty() {
            ListState::Idle
        } else {
            ListState::Filtered(text.to_string())
        };
        self.refresh_with(state)
    }

    /// Returns the task behind a tapped row for the edit screen.
    pub fn select_row(&self, index: usize) -> Option<Task> {
        self.tasks.get(index).cloned()
    }

    /// Builds an unsaved task for the add action.
    pub fn begin_add(&mut self, now_epoch_ms: i64) -> RepoResult<Task> {
        match self.store.next_id() {
            Ok(id) => Ok(Task::new(id, now_epoch_ms)),
            Err(err) => Err(self.report_error("add", "Could not create a task", err)),
        }
    }

    /// Handles a confirmed swipe-delete.
    ///
    /// Returns the deleted task, or `None` when `index` has no row.
    pub fn delete_row(&mut self, index: usize) -> RepoResult<Option<Task>> {
        let Some(task) = self.tasks.get(index).cloned() else {
            return Ok(None);
        };

        self.scheduler.cancel(task.id);

        if let Err(err) = self.store.delete(task.id) {
            return Err(self.report_error("delete", "Could not delete the task", err));
        }

        self.tasks.remove(index);
        self.view.remove_row(index);
        info!(
            "event=list_delete module=list status=ok task_id={} rows={}",
            task.id,
            self.tasks.len()
        );
        self.scheduler.log_pending();
        Ok(Some(task))
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn row_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn rows(&self) -> Vec<TaskRow> {
        self.tasks
            .iter()
            .map(|task| TaskRow::from_task(task, &self.display_offset))
            .collect()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    fn refresh_with(&mut self, state: ListState) -> RepoResult<()> {
        match self.store.query(state.filter()) {
            Ok(tasks) => {
                self.state = state;
                self.tasks = tasks;
                let rows = self.rows();
                self.view.reload(&rows);
                Ok(())
            }
            Err(err) => Err(self.report_error("query", "Could not load tasks", err)),
        }
    }

    fn report_error(&mut self, action: &str, message: &str, err: RepoError) -> RepoError {
        warn!("event=list_{action} module=list status=error error={err}");
        self.view.show_error(&format!("{message}: {err}"));
        err
    }
}
