use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifetime of a toast when the caller does not pick one.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl std::fmt::Display for ToastKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// Opaque toast identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToastId(String);

impl ToastId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ToastId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ToastId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub message: String,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

fn serialize_millis<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}

impl Toast {
    #[must_use]
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            id: ToastId::generate(),
            kind,
            message: message.into(),
            duration: DEFAULT_TOAST_DURATION,
        }
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_serializes_duration_in_millis() {
        let toast = Toast::new(ToastKind::Info, "hi");
        let json = serde_json::to_value(&toast).unwrap();
        assert_eq!(json["duration_ms"], 5000);
        assert_eq!(json["kind"], "info");
    }

    #[test]
    fn test_toast_creation() {
        let t = Toast::new(ToastKind::Success, "Message sent");
        assert_eq!(t.kind, ToastKind::Success);
        assert_eq!(t.message, "Message sent");
        assert_eq!(t.duration, Duration::from_millis(5000));
    }

    #[test]
    fn test_generated_ids_differ() {
        let a = Toast::new(ToastKind::Info, "a");
        let b = Toast::new(ToastKind::Info, "b");
        assert_ne!(a.id, b.id);
        assert!(!a.id.as_str().is_empty());
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&ToastKind::Error).unwrap();
        assert_eq!(json, "\"error\"");
    }
}
