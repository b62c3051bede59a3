//! Stacked rendering of the toast queue.

use std::fmt::Write as _;

use tokio::sync::watch;

use crate::application::services::ToastQueue;
use crate::domain::entities::{Toast, ToastId, ToastKind};
use crate::domain::services::escape_markup;

const CONTAINER_CLASS: &str = "fixed top-20 right-4 z-[10000] space-y-2";
const TOAST_CLASS: &str =
    "flex items-center gap-3 p-4 rounded-lg border backdrop-blur-sm shadow-lg max-w-md w-full";

/// Visual style for a toast kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastStyle {
    pub class: &'static str,
    pub icon: &'static str,
    pub glow: &'static str,
}

impl ToastStyle {
    #[must_use]
    pub const fn for_kind(kind: ToastKind) -> Self {
        match kind {
            ToastKind::Success => Self {
                class: "bg-gray-900/90 border-green-400 text-green-400 shadow-green-400/20",
                icon: "check-circle",
                glow: "rgba(34, 197, 94, 0.2)",
            },
            ToastKind::Error => Self {
                class: "bg-gray-900/90 border-red-400 text-red-400 shadow-red-400/20",
                icon: "alert-circle",
                glow: "rgba(239, 68, 68, 0.2)",
            },
            ToastKind::Info => Self {
                class: "bg-gray-900/90 border-cyan-400 text-cyan-400 shadow-cyan-400/20",
                icon: "info",
                glow: "rgba(6, 182, 212, 0.2)",
            },
        }
    }
}

/// Renders every queued toast at once, oldest on top, and re-renders when
/// the queue changes.
#[derive(Debug)]
pub struct ToastStack {
    queue: ToastQueue,
    changes: watch::Receiver<u64>,
}

impl ToastStack {
    #[must_use]
    pub fn new(queue: ToastQueue) -> Self {
        let changes = queue.subscribe();
        Self { queue, changes }
    }

    /// Waits until a toast is added or removed. Returns false once the queue
    /// is gone.
    pub async fn changed(&mut self) -> bool {
        self.changes.changed().await.is_ok()
    }

    /// Handles a click on a toast's close button.
    pub fn dismiss(&self, id: &ToastId) -> bool {
        self.queue.remove_toast(id)
    }

    #[must_use]
    pub fn render(&mut self) -> String {
        self.changes.borrow_and_update();
        render_toasts(&self.queue.toasts())
    }
}

/// Renders `toasts` as a stacked container.
#[must_use]
pub fn render_toasts(toasts: &[Toast]) -> String {
    let mut out = format!(r#"<div class="{CONTAINER_CLASS}">"#);
    for toast in toasts {
        let style = ToastStyle::for_kind(toast.kind);
        let id = escape_markup(toast.id.as_str());
        let _ = write!(
            out,
            concat!(
                r#"<div class="{} {}" style="box-shadow: 0 0 20px {}" role="status" data-toast-id="{}">"#,
                r#"<div class="flex-shrink-0"><i data-icon="{}" class="w-5 h-5"></i></div>"#,
                r#"<div class="flex-1 text-sm font-medium">{}</div>"#,
                r#"<button class="flex-shrink-0 p-1 rounded-full hover:bg-white/10 transition-colors" data-dismiss="{}" aria-label="Dismiss">"#,
                r#"<i data-icon="x" class="w-4 h-4"></i></button>"#,
                "</div>"
            ),
            TOAST_CLASS,
            style.class,
            style.glow,
            id,
            style.icon,
            escape_markup(&toast.message),
            id,
        );
    }
    out.push_str("</div>");
    out
}
