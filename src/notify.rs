//! User-facing notifications
//!
//! The wizard queues notifications here; the UI drains and renders them.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
    /// An operation has started and a follow-up notification will resolve it
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: Instant,
}

impl Notification {
    /// How long a toast stays on screen
    const DISPLAY_DURATION: Duration = Duration::from_secs(4);

    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: Instant::now(),
        }
    }

    /// Pending notifications stay until something replaces them
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    fn is_expired_at(&self, now: Instant) -> bool {
        self.level != NotificationLevel::Pending
            && now.saturating_duration_since(self.created_at) >= Self::DISPLAY_DURATION
    }
}

/// FIFO of notifications waiting to be shown
#[derive(Debug, Default)]
pub struct Notifications {
    queue: VecDeque<Notification>,
}

impl Notifications {
    pub fn push(&mut self, level: NotificationLevel, message: impl Into<String>) {
        let notification = Notification::new(level, message);
        tracing::debug!(level = ?notification.level, message = %notification.message, "Notification");
        self.queue.push_back(notification);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NotificationLevel::Success, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NotificationLevel::Info, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NotificationLevel::Error, message);
    }

    pub fn pending(&mut self, message: impl Into<String>) {
        self.push(NotificationLevel::Pending, message);
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.queue.back()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
