//! Port for one-shot viewport visibility detection.

use tokio::sync::oneshot;

/// Extra distance around the viewport, in pixels, that already counts as visible.
pub const DEFAULT_ROOT_MARGIN: f64 = 50.0;

/// Fraction of the element that must be visible.
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// Rectangle in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Grows the rectangle by `margin` on every side.
    #[must_use]
    pub fn expand(&self, margin: f64) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.width + 2.0 * margin,
            self.height + 2.0 * margin,
        )
    }

    /// Overlap with `other`, if the two touch at all.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right < left || bottom < top {
            return None;
        }
        Some(Self::new(left, top, right - left, bottom - top))
    }
}

/// Observer options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityOptions {
    /// Lookahead margin around the viewport, in pixels.
    pub root_margin: f64,
    /// Visible fraction required to fire, 0.0-1.0.
    pub threshold: f64,
}

impl Default for VisibilityOptions {
    fn default() -> Self {
        Self {
            root_margin: DEFAULT_ROOT_MARGIN,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Sending half of a one-shot visibility signal, held by the observer.
#[derive(Debug)]
pub struct VisibilityTrigger {
    tx: oneshot::Sender<()>,
}

impl VisibilityTrigger {
    /// Fires the signal. Returns false if the subscriber already went away.
    pub fn fire(self) -> bool {
        self.tx.send(()).is_ok()
    }

    /// Returns true once the subscriber has been dropped.
    #[must_use]
    pub fn is_disconnected(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving half of a one-shot visibility signal.
///
/// Dropping the subscription disconnects the observer.
#[derive(Debug)]
pub struct VisibilitySubscription {
    rx: oneshot::Receiver<()>,
}

impl VisibilitySubscription {
    /// Creates a connected trigger/subscription pair.
    #[must_use]
    pub fn channel() -> (VisibilityTrigger, Self) {
        let (tx, rx) = oneshot::channel();
        (VisibilityTrigger { tx }, Self { rx })
    }

    /// Non-blocking check. Returns true if the threshold has been crossed.
    pub fn try_crossed(&mut self) -> bool {
        self.rx.try_recv().is_ok()
    }

    /// Waits for the threshold to be crossed.
    ///
    /// Returns false if the observer was torn down without firing.
    pub async fn crossed(self) -> bool {
        self.rx.await.is_ok()
    }
}

/// Port for viewport intersection observation.
#[cfg_attr(test, mockall::automock)]
pub trait VisibilityPort: Send + Sync {
    /// Starts observing `bounds`. The returned subscription fires at most once.
    fn observe(&self, bounds: Rect, options: VisibilityOptions) -> VisibilitySubscription;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersection_of_overlapping_rects() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 80.0, 100.0, 100.0);
        let overlap = a.intersection(&b).unwrap();
        assert_eq!(overlap, Rect::new(50.0, 80.0, 50.0, 20.0));
        assert!((overlap.area() - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_disjoint_rects_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(0.0, 20.0, 10.0, 10.0);
        assert!(a.intersection(&b).is_none());
    }

    #[tokio::test]
    async fn test_subscription_fires_once() {
        let (trigger, subscription) = VisibilitySubscription::channel();
        assert!(!trigger.is_disconnected());
        assert!(trigger.fire());
        assert!(subscription.crossed().await);
    }

    #[tokio::test]
    async fn test_dropped_trigger_reports_not_crossed() {
        let (trigger, subscription) = VisibilitySubscription::channel();
        drop(trigger);
        assert!(!subscription.crossed().await);
    }

    #[test]
    fn test_dropped_subscription_disconnects() {
        let (trigger, subscription) = VisibilitySubscription::channel();
        drop(subscription);
        assert!(trigger.is_disconnected());
        assert!(!trigger.fire());
    }
}
