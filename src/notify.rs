use crate::extensions::LockOrRecover;
use chrono::{DateTime, Utc};
use std::fmt::Debug;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Level {
    Info,
    Error,
}

/// A short message shown to the user, which disappears after a while.
#[derive(Clone, PartialEq, Debug)]
pub struct Notification {
    pub level: Level,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

impl Notification {
    fn is_expired(&self, now: DateTime<Utc>, lifetime: Duration) -> bool {
        (now - self.raised_at).to_std().is_ok_and(|age| age >= lifetime)
    }
}

pub trait Notifier: Debug + Send + Sync {
    fn notify(&self, level: Level, message: String);
}

/// Keeps transient notifications until their lifetime runs out.
#[derive(Debug)]
pub struct NotificationCenter {
    lifetime: Duration,
    notifications: Mutex<Vec<Notification>>,
}

impl NotificationCenter {
    pub fn new(lifetime: Duration) -> Self {
        NotificationCenter {
            lifetime,
            notifications: Mutex::new(Vec::new()),
        }
    }

    pub fn active(&self) -> Vec<Notification> {
        self.active_at(Utc::now())
    }

    pub fn active_at(&self, now: DateTime<Utc>) -> Vec<Notification> {
        let mut notifications = self.notifications.lock_or_recover();
        notifications.retain(|notification| !notification.is_expired(now, self.lifetime));
        notifications.clone()
    }

    fn raise(&self, notification: Notification) {
        self.notifications.lock_or_recover().push(notification);
    }
}

impl Notifier for NotificationCenter {
    fn notify(&self, level: Level, message: String) {
        match level {
            Level::Info => info!("💬 {}", message),
            Level::Error => warn!("⚠️ {}", message),
        }

        self.raise(Notification {
            level,
            message,
            raised_at: Utc::now(),
        });
    }
}
