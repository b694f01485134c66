//! Transient user notifications

use serde::Serialize;
use std::time::Duration;

/// How long a toast stays up unless told otherwise
pub const DEFAULT_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient toast handed to the notification sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub description: Option<String>,
    pub duration: Duration,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
            description: None,
            duration: DEFAULT_DURATION,
        }
    }

    /// Error toast carrying the underlying failure's description
    pub fn error(description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: "Error".to_string(),
            description: Some(description.into()),
            duration: DEFAULT_DURATION,
        }
    }

    pub fn copied() -> Self {
        Self::success("Copied to clipboard")
    }
}
