use taskapp_core::db::open_db_in_memory;
use taskapp_core::{
    EditController, HostNotificationBridge, NotificationCenter, NotificationError,
    NotificationRequest, NotificationResult, NotificationScheduler, RepoError,
    SqliteTaskRepository, Task, TaskStore,
};

const BASE_MS: i64 = 1_700_000_000_000;

struct OfflineCenter;

impl NotificationCenter for OfflineCenter {
    fn register(&self, _request: NotificationRequest) -> NotificationResult<()> {
        Err(NotificationError::Unavailable("no permission prompt yet".to_string()))
    }

    fn cancel(&self, _identifier: &str) -> NotificationResult<()> {
        Ok(())
    }

    fn list_pending(&self) -> NotificationResult<Vec<NotificationRequest>> {
        Ok(Vec::new())
    }
}

#[test]
fn save_persists_task_and_schedules_reminder() {
    let conn = open_db_in_memory().unwrap();
    let store = TaskStore::new(SqliteTaskRepository::try_new(&conn).unwrap());
    let scheduler = NotificationScheduler::new(HostNotificationBridge::new());

    let mut form = EditController::new(Task::new(store.next_id().unwrap(), BASE_MS));
    form.set_title("Dentist");
    form.set_contents("Bring insurance card");
    form.set_category("health");
    form.set_date(BASE_MS + 1_000);

    let outcome = form.save(&store, &scheduler).unwrap();
    assert!(outcome.reminder_scheduled);

    let saved = store.get(0).unwrap().expect("task should be stored");
    assert_eq!(&saved, form.task());
    assert_eq!(saved.date, BASE_MS + 1_000);

    let pending = scheduler.pending();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].identifier, "0");
    assert_eq!(pending[0].fire_at, BASE_MS + 1_000);
    assert_eq!(pending[0].content.title, "Dentist");
    assert_eq!(pending[0].content.body, "Bring insurance card");
}

#[test]
fn editing_existing_task_updates_in_place_and_reschedules() {
    let conn = open_db_in_memory().unwrap();
    let store = TaskStore::new(SqliteTaskRepository::try_new(&conn).unwrap());
    let scheduler = NotificationScheduler::new(HostNotificationBridge::new());

    let mut form = EditController::new(Task::new(0, BASE_MS));
    form.set_title("v1");
    form.save(&store, &scheduler).unwrap();

    let mut again = EditController::new(store.get(0).unwrap().unwrap());
    again.set_title("v2");
    again.set_date(BASE_MS + 60_000);
    again.save(&store, &scheduler).unwrap();

    let all = store.query(None).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].title, "v2");

    let pending = scheduler.pending();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].fire_at, BASE_MS + 60_000);
}

#[test]
fn store_failure_skips_reminder() {
    let conn = open_db_in_memory().unwrap();
    let store = TaskStore::new(SqliteTaskRepository::try_new(&conn).unwrap());
    let scheduler = NotificationScheduler::new(HostNotificationBridge::new());

    let form = EditController::new(Task::new(-5, BASE_MS));
    let err = form.save(&store, &scheduler).unwrap_err();

    assert!(matches!(err, RepoError::Validation(_)));
    assert!(scheduler.pending().is_empty());
    assert!(store.query(None).unwrap().is_empty());
}

#[test]
fn reminder_failure_does_not_fail_save() {
    let conn = open_db_in_memory().unwrap();
    let store = TaskStore::new(SqliteTaskRepository::try_new(&conn).unwrap());
    let scheduler = NotificationScheduler::new(OfflineCenter);

    let form = EditController::new(Task::new(0, BASE_MS));
    let outcome = form.save(&store, &scheduler).unwrap();

    assert!(!outcome.reminder_scheduled);
    assert_eq!(store.query(None).unwrap().len(), 1);
}

#[test]
fn into_task_returns_edited_record() {
    let mut form = EditController::new(Task::new(3, BASE_MS));
    form.set_category("work");
    let task = form.into_task();
    assert_eq!(task.id, 3);
    assert_eq!(task.category, "work");
}
