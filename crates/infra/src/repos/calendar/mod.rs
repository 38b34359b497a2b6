mod inmemory;
mod postgres;

pub use inmemory::InMemoryCalendarRepo;
pub use postgres::PostgresCalendarRepo;

use sac_event_feedback_domain::Calendar;

#[async_trait::async_trait]
pub trait ICalendarRepo: Send + Sync {
    /// Stores the calendar and returns it with its assigned id
    async fn insert(&self, calendar: &Calendar) -> anyhow::Result<Calendar>;
    async fn save(&self, calendar: &Calendar) -> anyhow::Result<()>;
    async fn find(&self, calendar_id: i64) -> anyhow::Result<Option<Calendar>>;
}
