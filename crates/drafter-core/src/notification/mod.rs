//! Notification domain module.
//!
//! Components never reach for a global toast queue; they receive a
//! [`Notifier`] and report outcomes through it.

mod model;

pub use model::{Notification, NotificationEvent, NotificationId, RemovalReason, Severity};

/// Sink for user-facing feedback.
///
/// Posting never blocks the caller. Implementations remove every posted
/// notification exactly once, either on expiry or on dismissal.
pub trait Notifier: Send + Sync {
    /// Makes a notification visible and schedules its removal.
    fn post(&self, message: &str, severity: Severity) -> NotificationId;

    /// Removes a notification early. Unknown ids are ignored.
    fn dismiss(&self, id: NotificationId);

    fn info(&self, message: &str) -> NotificationId {
        self.post(message, Severity::Info)
    }

    fn success(&self, message: &str) -> NotificationId {
        self.post(message, Severity::Success)
    }

    fn error(&self, message: &str) -> NotificationId {
        self.post(message, Severity::Error)
    }
}
