//! Transient notifications
//!
//! A notification is visible until its duration elapses. When a tokio runtime
//! is running, a fire-and-forget task removes it on expiry; `active()` also
//! drops expired entries so callers without a runtime see the same result.
//! Timers are independent: a newer notification never cancels an older one.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub expires_at: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    items: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&self, message: &str, duration: Duration) -> Uuid {
        let notification = Notification {
            id: Uuid::new_v4(),
            message: message.to_string(),
            expires_at: Instant::now() + duration,
        };
        let id = notification.id;

        log::info!("[Notification] {}", message);
        self.lock_items().push(notification);

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let items = Arc::clone(&self.items);
            handle.spawn(async move {
                tokio::time::sleep(duration).await;
                let mut items = match items.lock() {
                    Ok(guard) => guard,
                    Err(poisoned) => poisoned.into_inner(),
                };
                items.retain(|n| n.id != id);
            });
        }

        id
    }

    /// Unexpired notifications, oldest first
    pub fn active(&self) -> Vec<Notification> {
        let now = Instant::now();
        let mut items = self.lock_items();
        items.retain(|n| n.expires_at > now);
        items.clone()
    }

    fn lock_items(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        match self.items.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("[Notification] Mutex poisoned, recovering...");
                poisoned.into_inner()
            }
        }
    }
}
