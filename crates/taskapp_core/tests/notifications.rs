use std::cell::RefCell;
use taskapp_core::notify::{FALLBACK_BODY, FALLBACK_TITLE};
use taskapp_core::{
    HostNotificationBridge, NotificationCenter, NotificationContent, NotificationError,
    NotificationRequest, NotificationResult, NotificationScheduler, Task,
};

/// Center that refuses every call and counts them.
#[derive(Default)]
struct RefusingCenter {
    calls: RefCell<u32>,
}

impl NotificationCenter for RefusingCenter {
    fn register(&self, _request: NotificationRequest) -> NotificationResult<()> {
        *self.calls.borrow_mut() += 1;
        Err(NotificationError::Rejected("permission denied".to_string()))
    }

    fn cancel(&self, _identifier: &str) -> NotificationResult<()> {
        *self.calls.borrow_mut() += 1;
        Err(NotificationError::Unavailable("offline".to_string()))
    }

    fn list_pending(&self) -> NotificationResult<Vec<NotificationRequest>> {
        Err(NotificationError::Unavailable("offline".to_string()))
    }
}

fn content(title: &str) -> NotificationContent {
    NotificationContent {
        title: title.to_string(),
        body: "body".to_string(),
    }
}

#[test]
fn schedule_keys_request_by_task_id() {
    let scheduler = NotificationScheduler::new(HostNotificationBridge::new());
    assert!(scheduler.schedule(7, 5_000, content("Buy milk")));

    let pending = scheduler.pending();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].identifier, "7");
    assert_eq!(pending[0].fire_at, 5_000);
    assert_eq!(pending[0].content.title, "Buy milk");
}

#[test]
fn rescheduling_replaces_existing_request() {
    let scheduler = NotificationScheduler::new(HostNotificationBridge::new());
    scheduler.schedule(1, 1_000, content("first"));
    scheduler.schedule(1, 2_000, content("second"));

    let pending = scheduler.pending();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].fire_at, 2_000);
    assert_eq!(pending[0].content.title, "second");
}

#[test]
fn cancel_removes_pending_and_is_noop_when_missing() {
    let scheduler = NotificationScheduler::new(HostNotificationBridge::new());
    scheduler.schedule(3, 1_000, content("x"));
    scheduler.schedule(4, 1_000, content("y"));

    assert!(scheduler.cancel(3));
    assert!(scheduler.cancel(99));

    let identifiers = scheduler
        .pending()
        .into_iter()
        .map(|request| request.identifier)
        .collect::<Vec<_>>();
    assert_eq!(identifiers, vec!["4"]);
}

#[test]
fn schedule_for_task_uses_task_fields_and_fallbacks() {
    let scheduler = NotificationScheduler::new(HostNotificationBridge::new());

    let mut titled = Task::new(0, 10_000);
    titled.title = "Write report".to_string();
    titled.contents = "Q3 numbers".to_string();
    scheduler.schedule_for_task(&titled);
    scheduler.schedule_for_task(&Task::new(1, 20_000));

    let pending = scheduler.pending();
    assert_eq!(pending[0].identifier, "0");
    assert_eq!(pending[0].fire_at, 10_000);
    assert_eq!(pending[0].content, content_pair("Write report", "Q3 numbers"));
    assert_eq!(pending[1].identifier, "1");
    assert_eq!(pending[1].content, content_pair(FALLBACK_TITLE, FALLBACK_BODY));
}

#[test]
fn host_failures_are_swallowed() {
    let scheduler = NotificationScheduler::new(RefusingCenter::default());

    assert!(!scheduler.schedule(1, 1_000, content("x")));
    assert!(!scheduler.cancel(1));
    assert!(scheduler.pending().is_empty());
    scheduler.log_pending();
    assert_eq!(*scheduler.center().calls.borrow(), 2);
}

#[test]
fn scheduler_accepts_borrowed_center() {
    let bridge = HostNotificationBridge::new();
    let scheduler = NotificationScheduler::new(&bridge);
    scheduler.schedule(2, 1_000, content("shared"));

    assert_eq!(bridge.list_pending().unwrap().len(), 1);
}

fn content_pair(title: &str, body: &str) -> NotificationContent {
    NotificationContent {
        title: title.to_string(),
        body: body.to_string(),
    }
}
