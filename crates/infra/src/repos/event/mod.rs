mod inmemory;
mod postgres;

pub use inmemory::InMemoryEventRepo;
pub use postgres::PostgresEventRepo;

use sac_event_feedback_domain::Event;

#[async_trait::async_trait]
pub trait IEventRepo: Send + Sync {
    /// Stores the event and returns it with its assigned id
    async fn insert(&self, event: &Event) -> anyhow::Result<Event>;
    async fn find(&self, event_id: i64) -> anyhow::Result<Option<Event>>;
}
