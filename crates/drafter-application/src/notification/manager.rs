use drafter_core::notification::{
    Notification, NotificationEvent, NotificationId, Notifier, RemovalReason, Severity,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::AbortHandle;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Process-wide ephemeral notification set with auto-expiry.
///
/// Every posted notification owns one scheduled removal task. Removal, by
/// timer or by [`NotificationManager::dismiss`], happens under a single lock,
/// so whichever path gets there first removes the entry and emits the only
/// `Removed` event; the other path finds nothing and does nothing.
///
/// `post` spawns onto the current tokio runtime and must be called from
/// within one.
#[derive(Clone)]
pub struct NotificationManager {
    state: Arc<Mutex<NotificationState>>,
    events: broadcast::Sender<NotificationEvent>,
    ttl: Duration,
}

#[derive(Default)]
struct NotificationState {
    /// Visible notifications in insertion order.
    visible: Vec<Notification>,
    /// Pending auto-removal tasks keyed by notification id.
    timers: HashMap<NotificationId, AbortHandle>,
}

impl NotificationManager {
    /// Creates a manager whose notifications expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: Arc::new(Mutex::new(NotificationState::default())),
            events,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Subscribes to changes of the visible set.
    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.events.subscribe()
    }

    /// Currently visible notifications in insertion order.
    pub fn active(&self) -> Vec<Notification> {
        self.lock().visible.clone()
    }

    /// Number of removal timers still outstanding.
    pub fn pending_timers(&self) -> usize {
        self.lock().timers.len()
    }

    /// Posts a notification and schedules its removal.
    pub fn post(&self, message: impl Into<String>, severity: Severity) -> NotificationId {
        let notification = Notification::new(message, severity);
        let id = notification.id;

        tracing::debug!(
            "[Notifications] Posting {} notification {}: {}",
            severity,
            id,
            notification.message
        );

        // The timer task takes the same lock to remove the entry, so it cannot
        // observe the entry before its handle is registered.
        let mut state = self.lock();
        state.visible.push(notification.clone());
        let _ = self.events.send(NotificationEvent::Posted(notification));

        let manager = self.clone();
        let ttl = self.ttl;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            manager.remove(id, RemovalReason::Expired);
        });
        state.timers.insert(id, timer.abort_handle());

        id
    }

    /// Removes a notification immediately and cancels its timer.
    ///
    /// Returns `false` when the id is unknown or already removed.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        self.remove(id, RemovalReason::Dismissed)
    }

    /// Dismisses every visible notification.
    pub fn clear(&self) {
        let ids: Vec<NotificationId> = self.lock().visible.iter().map(|n| n.id).collect();
        for id in ids {
            self.dismiss(id);
        }
    }

    fn remove(&self, id: NotificationId, reason: RemovalReason) -> bool {
        let mut state = self.lock();

        if let Some(timer) = state.timers.remove(&id) {
            if reason == RemovalReason::Dismissed {
                timer.abort();
            }
        }

        let Some(position) = state.visible.iter().position(|n| n.id == id) else {
            return false;
        };
        state.visible.remove(position);
        let _ = self.events.send(NotificationEvent::Removed { id, reason });

        tracing::debug!("[Notifications] Removed {} ({:?})", id, reason);
        true
    }

    fn lock(&self) -> MutexGuard<'_, NotificationState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Notifier for NotificationManager {
    fn post(&self, message: &str, severity: Severity) -> NotificationId {
        NotificationManager::post(self, message, severity)
    }

    fn dismiss(&self, id: NotificationId) {
        NotificationManager::dismiss(self, id);
    }
}
