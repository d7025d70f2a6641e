use taskapp_core::{Task, TaskValidationError};

#[test]
fn new_task_has_empty_text_fields() {
    let task = Task::new(7, 1_700_000_000_000);
    assert_eq!(task.id, 7);
    assert_eq!(task.date, 1_700_000_000_000);
    assert!(task.title.is_empty());
    assert!(task.contents.is_empty());
    assert!(task.category.is_empty());
}

#[test]
fn validate_rejects_negative_id() {
    let task = Task::new(-3, 0);
    assert_eq!(task.validate(), Err(TaskValidationError::NegativeId(-3)));
    assert!(Task::new(0, 0).validate().is_ok());
}

#[test]
fn notification_identifier_is_decimal_id() {
    assert_eq!(Task::new(0, 0).notification_identifier(), "0");
    assert_eq!(Task::new(42, 0).notification_identifier(), "42");
}

#[test]
fn serde_uses_plain_field_names() {
    let mut task = Task::new(1, 1_000);
    task.title = "Write report".to_string();
    task.category = "work".to_string();

    let value = serde_json::to_value(&task).unwrap();
    assert_eq!(value["id"], 1);
    assert_eq!(value["title"], "Write report");
    assert_eq!(value["contents"], "");
    assert_eq!(value["category"], "work");
    assert_eq!(value["date"], 1_000);

    let decoded: Task = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, task);
}
