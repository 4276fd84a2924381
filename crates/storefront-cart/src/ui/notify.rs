//! Transient notifications raised by cart actions.

use std::cell::RefCell;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// How long a success toast stays up by default.
pub const DEFAULT_TOAST_DURATION_MS: u64 = 2000;

/// Upper bound on a toast's lifetime.
const MAX_TOAST_DURATION_MS: u64 = 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
}

/// Receiver for user-facing notifications.
pub trait Notifier {
    fn notify(&self, kind: ToastKind, message: &str);

    fn success(&self, message: &str) {
        self.notify(ToastKind::Success, message);
    }
}

/// A notification with its display window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Toast {
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// In-process notifier that queues toasts for the page to show.
#[derive(Debug)]
pub struct ToastQueue {
    toasts: RefCell<Vec<Toast>>,
    duration: Duration,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION_MS)
    }
}

impl ToastQueue {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            toasts: RefCell::new(Vec::new()),
            duration: Duration::milliseconds(duration_ms.min(MAX_TOAST_DURATION_MS) as i64),
        }
    }

    /// Queue a toast created at `now`.
    pub fn push_at(&self, kind: ToastKind, message: &str, now: DateTime<Utc>) {
        self.toasts.borrow_mut().push(Toast {
            kind,
            message: message.to_string(),
            created_at: now,
            expires_at: now + self.duration,
        });
    }

    /// Toasts still on screen at `now`, oldest first. Expired ones are dropped.
    pub fn active(&self, now: DateTime<Utc>) -> Vec<Toast> {
        let mut toasts = self.toasts.borrow_mut();
        toasts.retain(|t| t.is_active(now));
        toasts.clone()
    }

    /// Take every queued toast, expired or not.
    pub fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.toasts.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.toasts.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.borrow().is_empty()
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, kind: ToastKind, message: &str) {
        self.push_at(kind, message, Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_queues_toast() {
        let queue = ToastQueue::default();
        queue.success("Added to cart!");

        let toasts = queue.drain();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Success);
        assert_eq!(toasts[0].message, "Added to cart!");
        assert!(queue.is_empty());
    }

    #[test]
    fn test_toasts_expire() {
        let queue = ToastQueue::new(1000);
        let start = Utc::now();
        queue.push_at(ToastKind::Success, "first", start);
        queue.push_at(ToastKind::Success, "second", start + Duration::milliseconds(800));

        assert_eq!(queue.active(start + Duration::milliseconds(500)).len(), 2);

        let later = queue.active(start + Duration::milliseconds(1200));
        assert_eq!(later.len(), 1);
        assert_eq!(later[0].message, "second");
        assert_eq!(queue.len(), 1);
    }
}
