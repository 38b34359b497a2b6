mod inmemory;
mod postgres;

pub use inmemory::InMemoryFeedbackRepo;
pub use postgres::PostgresFeedbackRepo;

use sac_event_feedback_domain::{Feedback, Uuid};

#[async_trait::async_trait]
pub trait IFeedbackRepo: Send + Sync {
    async fn insert(&self, feedback: &Feedback) -> anyhow::Result<()>;
    /// Feedbacks given by the registration with the given uuid
    async fn find_by_uuid(&self, uuid: &Uuid) -> anyhow::Result<Vec<Feedback>>;
}
