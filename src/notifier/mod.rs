pub mod telegram;

use crate::model::NotifyError;
use tracing::{info, warn};

pub use telegram::TelegramNotifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageFormat {
    Plain,
    MarkdownV2,
}

/// Delivers one message to one destination.
#[async_trait::async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, destination: &str, text: &str, format: MessageFormat) -> Result<(), NotifyError>;
}

/// Sends `text` to every destination. A failed destination is logged and does
/// not stop delivery to the rest. Returns how many deliveries succeeded.
pub async fn broadcast(
    sink: &dyn NotificationSink,
    destinations: &[String],
    text: &str,
    format: MessageFormat,
) -> usize {
    let mut delivered = 0;
    for destination in destinations.iter().map(|d| d.trim()).filter(|d| !d.is_empty()) {
        match sink.send(destination, text, format).await {
            Ok(()) => {
                info!("Notification sent to chat {}", destination);
                delivered += 1;
            }
            Err(e) => warn!("Notification to chat {} failed: {}", destination, e),
        }
    }
    delivered
}
