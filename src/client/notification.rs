//! Transient user notifications
//!
//! One notification is visible at a time. Each `show` schedules its own
//! dismissal; showing a new one cancels the previous timer so a stale timer
//! can never clear a newer message.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

/// How long a notification stays up
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Error,
        }
    }
}

#[derive(Default)]
struct Slot {
    current: Option<Notice>,
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

/// Single-slot notification holder with auto-dismiss.
///
/// `show` spawns onto the ambient tokio runtime.
pub struct Notifier {
    slot: Arc<Mutex<Slot>>,
    ttl: Duration,
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Notifier {
    pub fn new() -> Self {
        Self::with_ttl(NOTICE_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            ttl,
        }
    }

    /// Replaces whatever is showing and restarts the dismissal timer.
    pub fn show(&self, notice: Notice) {
        let mut slot = lock(&self.slot);
        if let Some(timer) = slot.timer.take() {
            timer.abort();
        }

        slot.generation += 1;
        slot.current = Some(notice);

        let generation = slot.generation;
        let shared = Arc::clone(&self.slot);
        let ttl = self.ttl;
        slot.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            let mut slot = lock(&shared);
            if slot.generation == generation {
                slot.current = None;
                slot.timer = None;
            }
        }));
    }

    pub fn dismiss(&self) {
        let mut slot = lock(&self.slot);
        if let Some(timer) = slot.timer.take() {
            timer.abort();
        }
        slot.generation += 1;
        slot.current = None;
    }

    pub fn current(&self) -> Option<Notice> {
        lock(&self.slot).current.clone()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Notifier {
    fn drop(&mut self) {
        if let Some(timer) = lock(&self.slot).timer.take() {
            timer.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn test_notice_expires_after_ttl() {
        let notifier = Notifier::new();
        notifier.show(Notice::success("Workout logged successfully!"));

        sleep(Duration::from_millis(2900)).await;
        assert_eq!(
            notifier.current(),
            Some(Notice::success("Workout logged successfully!"))
        );

        sleep(Duration::from_millis(200)).await;
        assert_eq!(notifier.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_notice_restarts_timer() {
        let notifier = Notifier::new();
        notifier.show(Notice::success("first"));

        sleep(Duration::from_secs(2)).await;
        notifier.show(Notice::error("second"));

        // First timer would have fired at 3s
        sleep(Duration::from_millis(1500)).await;
        assert_eq!(notifier.current(), Some(Notice::error("second")));

        sleep(Duration::from_millis(1600)).await;
        assert_eq!(notifier.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_clears_immediately() {
        let notifier = Notifier::new();
        notifier.show(Notice::error("Failed to load workouts. Please try again."));
        notifier.dismiss();
        assert_eq!(notifier.current(), None);

        notifier.show(Notice::success("again"));
        sleep(Duration::from_secs(1)).await;
        assert!(notifier.current().is_some());
    }
}
