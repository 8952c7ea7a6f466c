//! Single-slot, self-expiring status message.
//!
//! There is no queue: a new notification always preempts the current one and
//! restarts the expiry deadline. Time is passed in by the caller so the
//! channel never reads a clock on its own.

use std::time::{Duration, Instant};

pub const DEFAULT_TTL: Duration = Duration::from_millis(3000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Failure,
}

impl NotificationKind {
    pub fn label(self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Failure => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub expires_at: Instant,
}

#[derive(Debug)]
pub struct NotificationChannel {
    ttl: Duration,
    current: Option<Notification>,
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl NotificationChannel {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn notify(&mut self, message: impl Into<String>, kind: NotificationKind, now: Instant) {
        self.current = Some(Notification {
            message: message.into(),
            kind,
            expires_at: now + self.ttl,
        });
    }

    /// The live notification at `now`, if any.
    pub fn visible(&self, now: Instant) -> Option<&Notification> {
        self.current.as_ref().filter(|n| now < n.expires_at)
    }

    /// Drops an expired notification. Returns true when something was
    /// dropped, i.e. when the visible state changed.
    pub fn expire(&mut self, now: Instant) -> bool {
        match &self.current {
            Some(n) if now >= n.expires_at => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
#[path = "tests/notify_tests.rs"]
mod tests;
