//! Local reminder notifications.
//!
//! # Responsibility
//! - Define the seam to the host OS notification service.
//! - Keep at most one pending reminder per task, keyed by the task id.
//!
//! # Invariants
//! - Notification failures never propagate into task persistence.
//! - Identifiers are task ids rendered as decimal strings.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod bridge;
mod scheduler;

pub use bridge::{HostNotificationBridge, NotificationCommand};
pub use scheduler::{NotificationScheduler, FALLBACK_BODY, FALLBACK_TITLE};

pub type NotificationResult<T> = Result<T, NotificationError>;

/// User-visible part of a reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
}

/// One-shot reminder registered with the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub identifier: String,
    /// Unix epoch milliseconds.
    pub fire_at: i64,
    pub content: NotificationContent,
}

/// Error reported by a notification host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    /// The host refused the request (permission denied, quota, ...).
    Rejected(String),
    /// The host could not be reached.
    Unavailable(String),
}

impl Display for NotificationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(reason) => write!(f, "notification rejected: {reason}"),
            Self::Unavailable(reason) => write!(f, "notification host unavailable: {reason}"),
        }
    }
}

impl Error for NotificationError {}

/// Host notification service.
///
/// Implementations replace any pending request with the same identifier on
/// `register`, and treat `cancel` of an unknown identifier as success.
pub trait NotificationCenter {
    fn register(&self, request: NotificationRequest) -> NotificationResult<()>;
    fn cancel(&self, identifier: &str) -> NotificationResult<()>;
    fn list_pending(&self) -> NotificationResult<Vec<NotificationRequest>>;
}

impl<C: NotificationCenter + ?Sized> NotificationCenter for &C {
    fn register(&self, request: NotificationRequest) -> NotificationResult<()> {
        (**self).register(request)
    }

    fn cancel(&self, identifier: &str) -> NotificationResult<()> {
        (**self).cancel(identifier)
    }

    fn list_pending(&self) -> NotificationResult<Vec<NotificationRequest>> {
        (**self).list_pending()
    }
}
