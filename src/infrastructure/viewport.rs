//! Geometric viewport tracking.
//!
//! Observers register an element's bounds; each scroll or resize recomputes
//! the visible fraction against the viewport grown by the observer's root
//! margin. An observer fires once and is then forgotten.

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::domain::ports::{
    Rect, VisibilityOptions, VisibilityPort, VisibilitySubscription, VisibilityTrigger,
};

#[derive(Debug)]
struct Observer {
    bounds: Rect,
    options: VisibilityOptions,
    trigger: VisibilityTrigger,
}

impl Observer {
    fn is_visible_in(&self, viewport: &Rect) -> bool {
        let root = viewport.expand(self.options.root_margin);
        let Some(overlap) = self.bounds.intersection(&root) else {
            return false;
        };

        let area = self.bounds.area();
        if area <= 0.0 {
            return true;
        }
        overlap.area() / area >= self.options.threshold
    }
}

#[derive(Debug)]
struct TrackerState {
    viewport: Rect,
    observers: Vec<Observer>,
}

/// Viewport-intersection observer over a simulated viewport.
#[derive(Debug)]
pub struct ViewportTracker {
    state: Mutex<TrackerState>,
}

impl ViewportTracker {
    /// Creates a tracker with the viewport at the top of the document.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            state: Mutex::new(TrackerState {
                viewport: Rect::new(0.0, 0.0, width, height),
                observers: Vec::new(),
            }),
        }
    }

    #[must_use]
    pub fn viewport(&self) -> Rect {
        self.state.lock().viewport
    }

    /// Number of observers still waiting to fire.
    #[must_use]
    pub fn active_observers(&self) -> usize {
        self.state.lock().observers.len()
    }

    /// Moves the viewport to `y` and fires newly visible observers.
    pub fn scroll_to(&self, y: f64) {
        let mut state = self.state.lock();
        state.viewport.y = y;
        Self::evaluate(&mut state);
    }

    /// Replaces the viewport and fires newly visible observers.
    pub fn set_viewport(&self, viewport: Rect) {
        let mut state = self.state.lock();
        state.viewport = viewport;
        Self::evaluate(&mut state);
    }

    fn evaluate(state: &mut TrackerState) {
        let viewport = state.viewport;
        let mut fired = 0usize;

        let observers = std::mem::take(&mut state.observers);
        for observer in observers {
            if observer.trigger.is_disconnected() {
                continue;
            }
            if observer.is_visible_in(&viewport) {
                observer.trigger.fire();
                fired += 1;
            } else {
                state.observers.push(observer);
            }
        }

        if fired > 0 {
            debug!(fired, remaining = state.observers.len(), "Visibility observers fired");
        }
    }
}

impl VisibilityPort for ViewportTracker {
    fn observe(&self, bounds: Rect, options: VisibilityOptions) -> VisibilitySubscription {
        let (trigger, subscription) = VisibilitySubscription::channel();
        let observer = Observer {
            bounds,
            options,
            trigger,
        };

        let mut state = self.state.lock();
        if observer.is_visible_in(&state.viewport) {
            trace!(?bounds, "Element visible on observe");
            observer.trigger.fire();
        } else {
            state.observers.retain(|o| !o.trigger.is_disconnected());
            state.observers.push(observer);
        }
        subscription
    }
}
