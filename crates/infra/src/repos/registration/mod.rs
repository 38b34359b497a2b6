mod inmemory;
mod postgres;

pub use inmemory::InMemoryRegistrationRepo;
pub use postgres::PostgresRegistrationRepo;

use sac_event_feedback_domain::{Registration, Uuid};

#[async_trait::async_trait]
pub trait IRegistrationRepo: Send + Sync {
    /// Stores the registration and returns it with its assigned id
    async fn insert(&self, registration: &Registration) -> anyhow::Result<Registration>;
    async fn save(&self, registration: &Registration) -> anyhow::Result<()>;
    async fn find(&self, registration_id: i64) -> Option<Registration>;
    async fn find_by_uuid(&self, uuid: &Uuid) -> anyhow::Result<Option<Registration>>;
    /// Atomically increments `feedback_notification_count` and returns the
    /// new count
    async fn increment_notification_count(&self, registration_id: i64) -> anyhow::Result<i64>;
}
