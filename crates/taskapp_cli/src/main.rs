//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `taskapp_core` linkage without the Flutter/FFI runtime.
//! - Render the task list of a database file as the list screen would.
//!
//! Usage: `taskapp_cli [DB_PATH] [SEARCH_TEXT]`

use std::process::ExitCode;
use taskapp_core::db::open_db;
use taskapp_core::{
    HostNotificationBridge, ListController, ListView, NotificationScheduler,
    SqliteTaskRepository, TaskRow, TaskStore,
};

struct StdoutView;

impl ListView for StdoutView {
    fn reload(&mut self, rows: &[TaskRow]) {
        for row in rows {
            println!("{:>4}  {}  {}", row.id, row.date_line, row.title_line);
        }
        println!("rows={}", rows.len());
    }

    fn remove_row(&mut self, index: usize) {
        println!("removed row {index}");
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("error: {message}");
    }
}

fn main() -> ExitCode {
    println!("taskapp_core ping={}", taskapp_core::ping());
    println!("taskapp_core version={}", taskapp_core::core_version());

    let mut args = std::env::args().skip(1);
    let Some(db_path) = args.next() else {
        return ExitCode::SUCCESS;
    };
    let search_text = args.next().unwrap_or_default();

    match render_list(&db_path, &search_text) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn render_list(db_path: &str, search_text: &str) -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db(db_path)?;
    let store = TaskStore::new(SqliteTaskRepository::try_new(&conn)?);
    let scheduler = NotificationScheduler::new(HostNotificationBridge::new());
    let mut list = ListController::new(&store, &scheduler, StdoutView);
    list.set_search_text(search_text)?;
    Ok(())
}
