//! In-process notification center for UI shells.
//!
//! The shell owns the real OS notification plugin. This bridge keeps the
//! pending set on the Rust side and queues commands the shell drains and
//! replays against the plugin.

use super::{NotificationCenter, NotificationError, NotificationRequest, NotificationResult};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// Command the shell must forward to the OS notification service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationCommand {
    Register(NotificationRequest),
    Cancel { identifier: String },
}

#[derive(Debug, Default)]
struct BridgeState {
    pending: BTreeMap<String, NotificationRequest>,
    outbox: Vec<NotificationCommand>,
}

/// Thread-safe pending set plus command outbox.
#[derive(Debug, Default)]
pub struct HostNotificationBridge {
    state: Mutex<BridgeState>,
}

impl HostNotificationBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every queued command in submission order.
    pub fn drain_commands(&self) -> NotificationResult<Vec<NotificationCommand>> {
        let mut state = self.lock()?;
        Ok(std::mem::take(&mut state.outbox))
    }

    fn lock(&self) -> NotificationResult<MutexGuard<'_, BridgeState>> {
        self.state
            .lock()
            .map_err(|_| NotificationError::Unavailable("bridge state poisoned".to_string()))
    }
}

impl NotificationCenter for HostNotificationBridge {
    fn register(&self, request: NotificationRequest) -> NotificationResult<()> {
        let mut state = self.lock()?;
        state
            .pending
            .insert(request.identifier.clone(), request.clone());
        state.outbox.push(NotificationCommand::Register(request));
        Ok(())
    }

    fn cancel(&self, identifier: &str) -> NotificationResult<()> {
        let mut state = self.lock()?;
        state.pending.remove(identifier);
        state.outbox.push(NotificationCommand::Cancel {
            identifier: identifier.to_string(),
        });
        Ok(())
    }

    fn list_pending(&self) -> NotificationResult<Vec<NotificationRequest>> {
        let state = self.lock()?;
        let mut pending = state.pending.values().cloned().collect::<Vec<_>>();
        pending.sort_by(|a, b| {
            a.fire_at
                .cmp(&b.fire_at)
                .then_with(|| a.identifier.cmp(&b.identifier))
        });
        Ok(pending)
    }
}

#[cfg(test)]
mod tests {
    use super::{HostNotificationBridge, NotificationCommand};
    use crate::notify::{NotificationCenter, NotificationContent, NotificationRequest};

    fn request(identifier: &str, fire_at: i64) -> NotificationRequest {
        NotificationRequest {
            identifier: identifier.to_string(),
            fire_at,
            content: NotificationContent {
                title: "t".to_string(),
                body: "b".to_string(),
            },
        }
    }

    #[test]
    fn register_replaces_same_identifier() {
        let bridge = HostNotificationBridge::new();
        bridge.register(request("1", 10)).unwrap();
        bridge.register(request("1", 20)).unwrap();

        let pending = bridge.list_pending().unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].fire_at, 20);
    }

    #[test]
    fn cancel_unknown_identifier_is_ok() {
        let bridge = HostNotificationBridge::new();
        bridge.cancel("42").unwrap();
        assert!(bridge.list_pending().unwrap().is_empty());
    }

    #[test]
    fn drain_returns_commands_in_order_and_empties_outbox() {
        let bridge = HostNotificationBridge::new();
        bridge.register(request("3", 5)).unwrap();
        bridge.cancel("3").unwrap();

        let commands = bridge.drain_commands().unwrap();
        assert_eq!(
            commands,
            vec![
                NotificationCommand::Register(request("3", 5)),
                NotificationCommand::Cancel {
                    identifier: "3".to_string()
                },
            ]
        );
        assert!(bridge.drain_commands().unwrap().is_empty());
    }

    #[test]
    fn pending_is_sorted_by_fire_time() {
        let bridge = HostNotificationBridge::new();
        bridge.register(request("2", 300)).unwrap();
        bridge.register(request("1", 100)).unwrap();

        let identifiers = bridge
            .list_pending()
            .unwrap()
            .into_iter()
            .map(|r| r.identifier)
            .collect::<Vec<_>>();
        assert_eq!(identifiers, vec!["1", "2"]);
    }
}
