use super::INotificationCenter;
use reqwest::{Client, StatusCode};
use sac_event_feedback_domain::{Notification, ReceiptCollection};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::error;

#[derive(Debug, Serialize)]
struct SendNotificationRequest<'a> {
    tokens: &'a BTreeMap<String, String>,
    locale: &'a str,
}

pub struct HttpNotificationCenter {
    client: Client,
    base_url: String,
}

impl HttpNotificationCenter {
    /// Every request fails with a timeout error after `timeout`
    pub fn new(base_url: &str, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait::async_trait]
impl INotificationCenter for HttpNotificationCenter {
    async fn find_notification(&self, notification_id: i64) -> anyhow::Result<Option<Notification>> {
        let res = self
            .client
            .get(&format!("{}/notifications/{}", self.base_url, notification_id))
            .send()
            .await
            .map_err(|e| {
                error!(
                    "[Network Error] Notification center GET error. Error message: {:?}",
                    e
                );
                e
            })?;
        if res.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let notification = res
            .error_for_status()?
            .json::<Notification>()
            .await
            .map_err(|e| {
                error!(
                    "[Unexpected Response] Notification center GET error. Error message: {:?}",
                    e
                );
                e
            })?;
        Ok(Some(notification))
    }

    async fn send(
        &self,
        notification_id: i64,
        tokens: &BTreeMap<String, String>,
        locale: &str,
    ) -> anyhow::Result<ReceiptCollection> {
        let body = SendNotificationRequest { tokens, locale };
        let res = self
            .client
            .post(&format!(
                "{}/notifications/{}/send",
                self.base_url, notification_id
            ))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(
                    "[Network Error] Notification center POST error. Error message: {:?}",
                    e
                );
                e
            })?;
        let receipts = res
            .error_for_status()?
            .json::<ReceiptCollection>()
            .await
            .map_err(|e| {
                error!(
                    "[Unexpected Response] Notification center POST error. Error message: {:?}",
                    e
                );
                e
            })?;
        Ok(receipts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::time::Instant;

    #[tokio::test]
    async fn gives_up_on_unresponsive_notification_center() {
        // Accepts connections into the backlog but never answers
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());
        let center = HttpNotificationCenter::new(&address, Duration::from_millis(200)).unwrap();

        let started = Instant::now();
        let res = center.send(1, &BTreeMap::new(), "de").await;
        assert!(res.is_err());
        assert!(center.find_notification(1).await.is_err());
        assert!(started.elapsed() < Duration::from_secs(5));
        drop(listener);
    }
}
