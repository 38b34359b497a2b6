use super::IEventRepo;
use crate::repos::shared::inmemory_repo::*;
use sac_event_feedback_domain::Event;
use std::sync::atomic::{AtomicI64, Ordering};

pub struct InMemoryEventRepo {
    events: std::sync::Mutex<Vec<Event>>,
    last_id: AtomicI64,
}

impl InMemoryEventRepo {
    pub fn new() -> Self {
        Self {
            events: std::sync::Mutex::new(Vec::new()),
            last_id: AtomicI64::new(0),
        }
    }
}

#[async_trait::async_trait]
impl IEventRepo for InMemoryEventRepo {
    async fn insert(&self, event: &Event) -> anyhow::Result<Event> {
        let mut event = event.clone();
        event.id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        insert(&event, &self.events);
        Ok(event)
    }

    async fn find(&self, event_id: i64) -> anyhow::Result<Option<Event>> {
        Ok(find(&event_id, &self.events))
    }
}
