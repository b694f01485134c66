//! Terminal stand-ins for the clipboard and toast sinks

use async_trait::async_trait;
use devaddr_input::{Clipboard, ClipboardError, Notification, NotificationKind, Notifier};
use tokio::io::AsyncWriteExt;
use tracing::{error, info};

/// Writes copied text to stdout
pub struct StdoutClipboard {
    enabled: bool,
}

impl StdoutClipboard {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

#[async_trait]
impl Clipboard for StdoutClipboard {
    fn is_available(&self) -> bool {
        self.enabled
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(format!("{}\n", text).as_bytes())
            .await
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))?;
        stdout
            .flush()
            .await
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))
    }
}

/// Emits notifications as log events
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        let description = notification.description.as_deref().unwrap_or_default();
        match notification.kind {
            NotificationKind::Success => info!(
                description = %description,
                duration_secs = notification.duration.as_secs(),
                "{}",
                notification.message
            ),
            NotificationKind::Error => error!(
                description = %description,
                duration_secs = notification.duration.as_secs(),
                "{}",
                notification.message
            ),
        }
    }
}
