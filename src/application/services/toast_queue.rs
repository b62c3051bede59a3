//! Toast notifications: an ordered queue of short-lived messages, each
//! removed by its own timer or by an explicit dismissal.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, trace, warn};

use crate::domain::{Toast, ToastId, ToastKind};

struct Shared {
    toasts: Mutex<Vec<Toast>>,
    /// Toasts shown without a runtime, so no timer will remove them.
    unexpiring: Mutex<HashSet<ToastId>>,
    revision: watch::Sender<u64>,
}

impl Shared {
    fn remove(&self, id: &ToastId) -> bool {
        let removed = {
            let mut toasts = self.toasts.lock();
            let before = toasts.len();
            toasts.retain(|toast| &toast.id != id);
            toasts.len() != before
        };
        self.unexpiring.lock().remove(id);

        if removed {
            self.revision.send_modify(|rev| *rev = rev.wrapping_add(1));
        }
        removed
    }
}

/// Ordered queue of transient notifications.
///
/// Toasts are kept in insertion order and displayed together. Each toast has
/// its own expiry timer. Removal is idempotent, so a manual dismissal racing
/// the timer is harmless. Cloning yields another handle to the same queue.
///
/// Expiry timers are spawned on the current Tokio runtime. A toast shown
/// outside a runtime has no timer and stays until dismissed; such toasts are
/// listed by [`ToastQueue::unexpiring`].
#[derive(Clone)]
pub struct ToastQueue {
    shared: Arc<Shared>,
    default_duration: Duration,
}

impl std::fmt::Debug for ToastQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastQueue")
            .field("toasts", &self.shared.toasts.lock().len())
            .field("default_duration", &self.default_duration)
            .finish()
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(crate::domain::entities::DEFAULT_TOAST_DURATION)
    }
}

impl ToastQueue {
    #[must_use]
    pub fn new(default_duration: Duration) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            shared: Arc::new(Shared {
                toasts: Mutex::new(Vec::new()),
                unexpiring: Mutex::new(HashSet::new()),
                revision,
            }),
            default_duration,
        }
    }

    /// Appends a toast and schedules its removal after `duration`, or the
    /// queue's default duration when `None`.
    ///
    /// Without a Tokio runtime the toast stays until it is dismissed.
    pub fn show_toast(
        &self,
        kind: ToastKind,
        message: impl Into<String>,
        duration: Option<Duration>,
    ) -> ToastId {
        let toast = Toast::new(kind, message).with_duration(duration.unwrap_or(self.default_duration));
        let id = toast.id.clone();
        let duration = toast.duration;

        debug!(id = %id, kind = %kind, "Showing toast");
        self.shared.toasts.lock().push(toast);
        self.shared
            .revision
            .send_modify(|rev| *rev = rev.wrapping_add(1));

        self.schedule_expiry(id.clone(), duration);
        id
    }

    fn schedule_expiry(&self, id: ToastId, duration: Duration) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(id = %id, "No runtime available, toast will not expire");
            self.shared.unexpiring.lock().insert(id);
            return;
        };

        let shared = Arc::clone(&self.shared);
        handle.spawn(async move {
            tokio::time::sleep(duration).await;
            if shared.remove(&id) {
                trace!(id = %id, "Toast expired");
            }
        });
    }

    pub fn success(&self, message: impl Into<String>) -> ToastId {
        self.show_toast(ToastKind::Success, message, None)
    }

    pub fn error(&self, message: impl Into<String>) -> ToastId {
        self.show_toast(ToastKind::Error, message, None)
    }

    pub fn info(&self, message: impl Into<String>) -> ToastId {
        self.show_toast(ToastKind::Info, message, None)
    }

    /// Removes the toast with `id`. Returns false if it was already gone.
    pub fn remove_toast(&self, id: &ToastId) -> bool {
        let removed = self.shared.remove(id);
        if removed {
            debug!(id = %id, "Toast dismissed");
        }
        removed
    }

    /// Snapshot of the queue, oldest first.
    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        self.shared.toasts.lock().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.toasts.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shared.toasts.lock().is_empty()
    }

    /// Toasts still queued that have no expiry timer, oldest first.
    #[must_use]
    pub fn unexpiring(&self) -> Vec<ToastId> {
        let unexpiring = self.shared.unexpiring.lock();
        self.shared
            .toasts
            .lock()
            .iter()
            .filter(|toast| unexpiring.contains(&toast.id))
            .map(|toast| toast.id.clone())
            .collect()
    }

    /// Receiver that changes whenever a toast is added or removed.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.shared.revision.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn advance(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_toast_expires_after_default_duration() {
        let queue = ToastQueue::default();

        queue.show_toast(ToastKind::Success, "X", None);
        assert_eq!(queue.len(), 1);

        advance(4999).await;
        assert_eq!(queue.len(), 1);

        advance(2).await;
        assert!(queue.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_duration() {
        let queue = ToastQueue::default();

        queue.show_toast(ToastKind::Info, "short", Some(Duration::from_millis(1000)));
        queue.show_toast(ToastKind::Info, "long", None);

        advance(1001).await;
        let remaining = queue.toasts();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].message, "long");
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_middle_keeps_order() {
        let queue = ToastQueue::default();

        let first = queue.success("first");
        let middle = queue.error("middle");
        let last = queue.info("last");

        assert!(queue.remove_toast(&middle));

        let ids: Vec<ToastId> = queue.toasts().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![first, last]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_after_expiry_is_noop() {
        let queue = ToastQueue::default();
        let id = queue.success("gone soon");
        let survivor = queue.show_toast(ToastKind::Info, "stays", Some(Duration::from_secs(60)));

        advance(5001).await;
        assert_eq!(queue.len(), 1);

        assert!(!queue.remove_toast(&id));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.toasts()[0].id, survivor);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_dismissal_then_timer_fires() {
        let queue = ToastQueue::default();
        let id = queue.success("dismissed");
        let mut changes = queue.subscribe();
        changes.borrow_and_update();

        assert!(queue.remove_toast(&id));
        assert!(changes.has_changed().unwrap());
        changes.borrow_and_update();

        advance(5001).await;
        assert!(queue.is_empty());
        assert!(!changes.has_changed().unwrap());
    }

    #[test]
    fn test_without_runtime_toast_stays_and_is_reported() {
        let queue = ToastQueue::default();
        let id = queue.info("no runtime");
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.unexpiring(), vec![id.clone()]);

        assert!(queue.remove_toast(&id));
        assert!(queue.is_empty());
        assert!(queue.unexpiring().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_toasts_are_not_reported_unexpiring() {
        let queue = ToastQueue::default();
        queue.success("timed");
        assert!(queue.unexpiring().is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_the_queue() {
        let queue = ToastQueue::default();
        let handle = queue.clone();

        handle.info("from clone");
        assert_eq!(queue.len(), 1);
    }
}
