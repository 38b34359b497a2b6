use super::INotificationCenter;
use sac_event_feedback_domain::{Notification, ReceiptCollection};
use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub struct SentNotification {
    pub notification_id: i64,
    pub tokens: BTreeMap<String, String>,
    pub locale: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SendBehaviour {
    Deliver,
    Reject,
    Unreachable,
}

/// Notification center used in tests. Records every accepted send.
pub struct InMemoryNotificationCenter {
    notifications: Mutex<Vec<Notification>>,
    sent: Mutex<Vec<SentNotification>>,
    behaviour: Mutex<SendBehaviour>,
    /// Number of sends that are delivered before the center becomes
    /// unreachable, `None` for no limit
    fail_after: Mutex<Option<usize>>,
}

impl InMemoryNotificationCenter {
    pub fn new() -> Self {
        Self {
            notifications: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
            behaviour: Mutex::new(SendBehaviour::Deliver),
            fail_after: Mutex::new(None),
        }
    }

    pub fn add_notification(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }

    pub fn sent(&self) -> Vec<SentNotification> {
        self.sent.lock().unwrap().clone()
    }

    /// Every following send returns zero receipts
    pub fn reject_all(&self) {
        *self.behaviour.lock().unwrap() = SendBehaviour::Reject;
    }

    /// Every following request fails with a transport error
    pub fn go_offline(&self) {
        *self.behaviour.lock().unwrap() = SendBehaviour::Unreachable;
    }

    /// Delivers `count` more notifications and then behaves as if offline
    pub fn go_offline_after(&self, count: usize) {
        *self.fail_after.lock().unwrap() = Some(count);
    }
}

impl Default for InMemoryNotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl INotificationCenter for InMemoryNotificationCenter {
    async fn find_notification(&self, notification_id: i64) -> anyhow::Result<Option<Notification>> {
        if *self.behaviour.lock().unwrap() == SendBehaviour::Unreachable {
            anyhow::bail!("Notification center is unreachable");
        }
        let notifications = self.notifications.lock().unwrap();
        Ok(notifications
            .iter()
            .find(|n| n.id == notification_id)
            .cloned())
    }

    async fn send(
        &self,
        notification_id: i64,
        tokens: &BTreeMap<String, String>,
        locale: &str,
    ) -> anyhow::Result<ReceiptCollection> {
        {
            let mut fail_after = self.fail_after.lock().unwrap();
            match *fail_after {
                Some(0) => anyhow::bail!("Notification center is unreachable"),
                Some(remaining) => *fail_after = Some(remaining - 1),
                None => (),
            }
        }
        let behaviour = *self.behaviour.lock().unwrap();
        match behaviour {
            SendBehaviour::Unreachable => anyhow::bail!("Notification center is unreachable"),
            SendBehaviour::Reject => return Ok(ReceiptCollection::default()),
            SendBehaviour::Deliver => (),
        }
        if self.find_notification(notification_id).await?.is_none() {
            return Ok(ReceiptCollection::default());
        }

        let mut sent = self.sent.lock().unwrap();
        sent.push(SentNotification {
            notification_id,
            tokens: tokens.clone(),
            locale: locale.to_string(),
        });
        Ok(ReceiptCollection {
            receipts: vec![format!("receipt-{}", sent.len())],
        })
    }
}
