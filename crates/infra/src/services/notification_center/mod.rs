mod http;
mod inmemory;

pub use http::HttpNotificationCenter;
pub use inmemory::{InMemoryNotificationCenter, SentNotification};

use sac_event_feedback_domain::{Notification, ReceiptCollection};
use std::collections::BTreeMap;

/// The external service that renders notification templates with simple
/// tokens and delivers them
#[async_trait::async_trait]
pub trait INotificationCenter: Send + Sync {
    async fn find_notification(&self, notification_id: i64) -> anyhow::Result<Option<Notification>>;
    /// Sends the notification. An `Err` means the notification center could
    /// not be reached, an empty `ReceiptCollection` that it did not accept
    /// any message.
    async fn send(
        &self,
        notification_id: i64,
        tokens: &BTreeMap<String, String>,
        locale: &str,
    ) -> anyhow::Result<ReceiptCollection>;
}
