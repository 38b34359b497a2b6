use super::IFeedbackRepo;
use crate::repos::shared::inmemory_repo::*;
use sac_event_feedback_domain::{Feedback, Uuid};

pub struct InMemoryFeedbackRepo {
    feedbacks: std::sync::Mutex<Vec<Feedback>>,
}

impl InMemoryFeedbackRepo {
    pub fn new() -> Self {
        Self {
            feedbacks: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IFeedbackRepo for InMemoryFeedbackRepo {
    async fn insert(&self, feedback: &Feedback) -> anyhow::Result<()> {
        insert(feedback, &self.feedbacks);
        Ok(())
    }

    async fn find_by_uuid(&self, uuid: &Uuid) -> anyhow::Result<Vec<Feedback>> {
        Ok(find_by(&self.feedbacks, |f| f.uuid == *uuid))
    }
}
