//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose list/edit/delete use-cases and the reminder outbox to Dart via FRB.
//! - Translate core errors into response envelopes the UI can show.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every call opens the configured database, so the list always reflects
//!   the latest committed state.
//! - Reminder commands are queued in-process; the shell drains them and
//!   applies them to the OS notification plugin.

use std::path::PathBuf;
use std::sync::OnceLock;
use taskapp_core::db::open_db;
use taskapp_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, now_epoch_ms,
    ping as ping_inner, EditController, HostNotificationBridge, ListController, ListView,
    NotificationCenter, NotificationCommand, NotificationRequest, NotificationScheduler,
    SqliteTaskRepository, Task, TaskId, TaskRow, TaskStore,
};

const DB_FILE_NAME: &str = "taskapp.sqlite3";
const DB_PATH_ENV: &str = "TASKAPP_DB_PATH";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static NOTIFICATIONS: OnceLock<HostNotificationBridge> = OnceLock::new();

type FfiStore<'conn> = TaskStore<SqliteTaskRepository<'conn>>;
type FfiScheduler = NotificationScheduler<&'static HostNotificationBridge>;

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the database file used by every task call.
///
/// Must run before the first task call to take effect; the app passes its
/// documents directory path here.
///
/// # FFI contract
/// - Returns empty string on success and error message on failure.
/// - Calling again with the already active path is a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_db_path(path: String) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "db path cannot be empty".to_string();
    }

    let requested = PathBuf::from(trimmed);
    let active = DB_PATH.get_or_init(|| requested.clone());
    if *active == requested {
        String::new()
    } else {
        format!(
            "task database already bound to `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        )
    }
}

/// One visible list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListItem {
    pub id: i64,
    /// `"{title} | {category}"`.
    pub title_line: String,
    /// Local date formatted as `yyyy-MM-dd HH:mm`.
    pub date_line: String,
}

/// List screen payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    pub ok: bool,
    pub items: Vec<TaskListItem>,
    /// Whether a category filter was applied.
    pub filtered: bool,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

/// Edit form payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: i64,
    pub title: String,
    pub contents: String,
    pub category: String,
    pub date_epoch_ms: i64,
}

/// Envelope for calls returning one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItemResponse {
    pub ok: bool,
    pub item: Option<TaskItem>,
    pub message: String,
}

/// Envelope for save/delete calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    pub ok: bool,
    pub task_id: Option<i64>,
    pub message: String,
}

impl TaskActionResponse {
    fn success(message: impl Into<String>, task_id: TaskId) -> Self {
        Self {
            ok: true,
            task_id: Some(task_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task_id: None,
            message: message.into(),
        }
    }
}

/// Pending reminder as seen by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationItem {
    pub identifier: String,
    pub fire_at_epoch_ms: i64,
    pub title: String,
    pub body: String,
}

/// Command the shell applies to the OS notification plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationCommandItem {
    /// `register` or `cancel`.
    pub action: String,
    pub identifier: String,
    /// Set for `register` only.
    pub notification: Option<NotificationItem>,
}

/// Lists tasks for the list screen.
///
/// Empty `search_text` lists everything; otherwise only tasks whose category
/// contains the text (case-sensitive).
#[flutter_rust_bridge::frb(sync)]
pub fn task_list(search_text: String) -> TaskListResponse {
    let filtered = !search_text.is_empty();
    let result = with_task_store(|store, scheduler| {
        let mut list = ListController::new(store, scheduler, EnvelopeView);
        list.set_search_text(search_text.as_str())
            .map_err(|err| err.to_string())?;
        Ok(list.rows())
    });

    match result {
        Ok(rows) => {
            let items = rows.into_iter().map(to_list_item).collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No tasks.".to_string()
            } else {
                format!("{} task(s).", items.len())
            };
            TaskListResponse {
                ok: true,
                items,
                filtered,
                message,
            }
        }
        Err(err) => TaskListResponse {
            ok: false,
            items: Vec::new(),
            filtered,
            message: format!("task_list failed: {err}"),
        },
    }
}

/// Builds an unsaved task for the add action (next id, current time).
#[flutter_rust_bridge::frb(sync)]
pub fn task_new_draft() -> TaskItemResponse {
    let result = with_task_store(|store, scheduler| {
        let mut list = ListController::new(store, scheduler, EnvelopeView);
        list.begin_add(now_epoch_ms()).map_err(|err| err.to_string())
    });

    match result {
        Ok(task) => TaskItemResponse {
            ok: true,
            item: Some(to_task_item(task)),
            message: "Draft ready.".to_string(),
        },
        Err(err) => TaskItemResponse {
            ok: false,
            item: None,
            message: format!("task_new_draft failed: {err}"),
        },
    }
}

/// Loads one task for the edit form.
#[flutter_rust_bridge::frb(sync)]
pub fn task_get(id: i64) -> TaskItemResponse {
    match with_task_store(|store, _| store.get(id).map_err(|err| err.to_string())) {
        Ok(Some(task)) => TaskItemResponse {
            ok: true,
            item: Some(to_task_item(task)),
            message: "Task loaded.".to_string(),
        },
        Ok(None) => TaskItemResponse {
            ok: true,
            item: None,
            message: format!("Task {id} not found."),
        },
        Err(err) => TaskItemResponse {
            ok: false,
            item: None,
            message: format!("task_get failed: {err}"),
        },
    }
}

/// Saves the edit form and schedules its reminder.
///
/// A reminder failure is reported in `message` but does not fail the save.
#[flutter_rust_bridge::frb(sync)]
pub fn task_save(item: TaskItem) -> TaskActionResponse {
    let form = EditController::new(from_task_item(item));
    let result = with_task_store(|store, scheduler| {
        form.save(store, scheduler).map_err(|err| err.to_string())
    });

    match result {
        Ok(outcome) if outcome.reminder_scheduled => {
            TaskActionResponse::success("Task saved.", form.task().id)
        }
        Ok(_) => TaskActionResponse::success(
            "Task saved; reminder could not be scheduled.",
            form.task().id,
        ),
        Err(err) => TaskActionResponse::failure(format!("task_save failed: {err}")),
    }
}

/// Deletes a task and cancels its reminder.
///
/// The reminder is cancelled first, even when the task is missing or the
/// database cannot be opened.
#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(id: i64) -> TaskActionResponse {
    NotificationScheduler::new(notification_bridge()).cancel(id);

    let result = with_task_store(|store, scheduler| {
        let mut list = ListController::new(store, scheduler, EnvelopeView);
        list.load().map_err(|err| err.to_string())?;
        let Some(index) = list.tasks().iter().position(|task| task.id == id) else {
            return Ok(None);
        };
        list.delete_row(index).map_err(|err| err.to_string())
    });

    match result {
        Ok(Some(task)) => TaskActionResponse::success("Task deleted.", task.id),
        Ok(None) => TaskActionResponse::failure(format!("task_delete failed: task {id} not found")),
        Err(err) => TaskActionResponse::failure(format!("task_delete failed: {err}")),
    }
}

/// Takes queued reminder commands for the shell to apply.
#[flutter_rust_bridge::frb(sync)]
pub fn notifications_drain() -> Vec<NotificationCommandItem> {
    match notification_bridge().drain_commands() {
        Ok(commands) => commands.into_iter().map(to_command_item).collect(),
        Err(err) => {
            log::warn!("event=notification_drain module=ffi status=error error={err}");
            Vec::new()
        }
    }
}

/// Lists reminders currently pending on the Rust side.
#[flutter_rust_bridge::frb(sync)]
pub fn notifications_pending() -> Vec<NotificationItem> {
    match notification_bridge().list_pending() {
        Ok(pending) => pending.into_iter().map(to_notification_item).collect(),
        Err(err) => {
            log::warn!("event=notification_pending module=ffi status=error error={err}");
            Vec::new()
        }
    }
}

/// The Dart side renders from response envelopes, so view callbacks are
/// no-ops and errors travel through `Result`.
struct EnvelopeView;

impl ListView for EnvelopeView {
    fn reload(&mut self, _rows: &[TaskRow]) {}

    fn remove_row(&mut self, _index: usize) {}

    fn show_error(&mut self, _message: &str) {}
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn notification_bridge() -> &'static HostNotificationBridge {
    NOTIFICATIONS.get_or_init(HostNotificationBridge::new)
}

fn with_task_store<T>(
    f: impl FnOnce(&FfiStore<'_>, &FfiScheduler) -> Result<T, String>,
) -> Result<T, String> {
    let conn =
        open_db(resolve_db_path()).map_err(|err| format!("task DB open failed: {err}"))?;
    let repo = SqliteTaskRepository::try_new(&conn)
        .map_err(|err| format!("task repo init failed: {err}"))?;
    let store = TaskStore::new(repo);
    let scheduler = NotificationScheduler::new(notification_bridge());
    f(&store, &scheduler)
}

fn to_list_item(row: TaskRow) -> TaskListItem {
    TaskListItem {
        id: row.id,
        title_line: row.title_line,
        date_line: row.date_line,
    }
}

fn to_task_item(task: Task) -> TaskItem {
    TaskItem {
        id: task.id,
        title: task.title,
        contents: task.contents,
        category: task.category,
        date_epoch_ms: task.date,
    }
}

fn from_task_item(item: TaskItem) -> Task {
    Task {
        id: item.id,
        title: item.title,
        contents: item.contents,
        category: item.category,
        date: item.date_epoch_ms,
    }
}

fn to_notification_item(request: NotificationRequest) -> NotificationItem {
    NotificationItem {
        identifier: request.identifier,
        fire_at_epoch_ms: request.fire_at,
        title: request.content.title,
        body: request.content.body,
    }
}

fn to_command_item(command: NotificationCommand) -> NotificationCommandItem {
    match command {
        NotificationCommand::Register(request) => NotificationCommandItem {
            action: "register".to_string(),
            identifier: request.identifier.clone(),
            notification: Some(to_notification_item(request)),
        },
        NotificationCommand::Cancel { identifier } => NotificationCommandItem {
            action: "cancel".to_string(),
            identifier,
            notification: None,
        },
    }
}
