//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide upsert/delete/list APIs over the `tasks` table.
//! - Own category filtering and date ordering semantics.
//!
//! # Invariants
//! - Every mutation runs in its own IMMEDIATE transaction; a failure leaves
//!   the table untouched.
//! - List results are ordered by `date ASC, id ASC`.
//! - Category filtering is a case-sensitive substring match.

use crate::db::DbError;
use crate::model::task::{Task, TaskId, TaskValidationError};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    contents,
    category,
    date
FROM tasks";

const TASK_COLUMNS: [&str; 5] = ["id", "title", "contents", "category", "date"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TaskValidationError),
    Db(DbError),
    NotFound(TaskId),
    /// The largest stored id leaves no room for another task.
    IdSpaceExhausted(TaskId),
    InvalidData(String),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::IdSpaceExhausted(max) => {
                write!(f, "no task id left after {max}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing; run migrations first")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_)
            | Self::IdSpaceExhausted(_)
            | Self::InvalidData(_)
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query options for listing tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListQuery {
    /// Case-sensitive substring the category must contain.
    ///
    /// `None` and `Some("")` both list every task.
    pub category_contains: Option<String>,
}

impl TaskListQuery {
    /// Lists every task.
    pub fn all() -> Self {
        Self::default()
    }

    /// Lists tasks whose category contains `text`.
    pub fn category_contains(text: impl Into<String>) -> Self {
        Self {
            category_contains: Some(text.into()),
        }
    }

    fn effective_filter(&self) -> Option<&str> {
        self.category_contains
            .as_deref()
            .filter(|text| !text.is_empty())
    }
}

/// Repository interface for task persistence.
pub trait TaskRepository {
    /// Inserts the task, or replaces the stored row with the same id.
    fn upsert_task(&self, task: &Task) -> RepoResult<()>;
    /// Removes one task by id.
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<Task>>;
    /// Largest stored id, or `None` for an empty table.
    fn max_task_id(&self) -> RepoResult<Option<TaskId>>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// Fails when the `tasks` schema is not in place.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_task_table_ready(conn)?;
        Ok(Self { conn })
    }

    fn write_tx(&self) -> RepoResult<Transaction<'conn>> {
        Ok(Transaction::new_unchecked(
            self.conn,
            TransactionBehavior::Immediate,
        )?)
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn upsert_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;

        let tx = self.write_tx()?;
        tx.execute(
            "INSERT INTO tasks (id, title, contents, category, date)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                contents = excluded.contents,
                category = excluded.category,
                date = excluded.date;",
            params![
                task.id,
                task.title.as_str(),
                task.contents.as_str(),
                task.category.as_str(),
                task.date,
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let tx = self.write_tx()?;
        let changed = tx.execute("DELETE FROM tasks WHERE id = ?1;", [id])?;
        if changed == 0 {
            // Dropping the transaction rolls it back.
            return Err(RepoError::NotFound(id));
        }
        tx.commit()?;
        Ok(())
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }
        Ok(None)
    }

    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<Task>> {
        let mut sql = format!("{TASK_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(text) = query.effective_filter() {
            // instr() is case-sensitive, unlike LIKE.
            sql.push_str(" AND instr(category, ?) > 0");
            bind_values.push(Value::Text(text.to_string()));
        }

        sql.push_str(" ORDER BY date ASC, id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }

    fn max_task_id(&self) -> RepoResult<Option<TaskId>> {
        let max = self.conn.query_row("SELECT MAX(id) FROM tasks;", [], |row| {
            row.get::<_, Option<TaskId>>(0)
        })?;
        Ok(max)
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let task = Task {
        id: row.get("id")?,
        title: row.get("title")?,
        contents: row.get("contents")?,
        category: row.get("category")?,
        date: row.get("date")?,
    };
    task.validate()
        .map_err(|err| RepoError::InvalidData(format!("{err} in tasks.id")))?;
    Ok(task)
}

fn ensure_task_table_ready(conn: &Connection) -> RepoResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'tasks'
        );",
        [],
        |row| row.get(0),
    )?;
    if exists != 1 {
        return Err(RepoError::MissingRequiredTable("tasks"));
    }

    let mut stmt = conn.prepare("PRAGMA table_info(tasks);")?;
    let mut rows = stmt.query([])?;
    let mut present = Vec::new();
    while let Some(row) = rows.next()? {
        present.push(row.get::<_, String>(1)?);
    }

    for column in TASK_COLUMNS {
        if !present.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: "tasks",
                column,
            });
        }
    }
    Ok(())
}
