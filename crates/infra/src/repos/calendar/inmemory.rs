use super::ICalendarRepo;
use crate::repos::shared::inmemory_repo::*;
use sac_event_feedback_domain::Calendar;
use std::sync::atomic::{AtomicI64, Ordering};

pub struct InMemoryCalendarRepo {
    calendars: std::sync::Mutex<Vec<Calendar>>,
    last_id: AtomicI64,
}

impl InMemoryCalendarRepo {
    pub fn new() -> Self {
        Self {
            calendars: std::sync::Mutex::new(Vec::new()),
            last_id: AtomicI64::new(0),
        }
    }
}

#[async_trait::async_trait]
impl ICalendarRepo for InMemoryCalendarRepo {
    async fn insert(&self, calendar: &Calendar) -> anyhow::Result<Calendar> {
        let mut calendar = calendar.clone();
        calendar.id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        insert(&calendar, &self.calendars);
        Ok(calendar)
    }

    async fn save(&self, calendar: &Calendar) -> anyhow::Result<()> {
        save(calendar, &self.calendars);
        Ok(())
    }

    async fn find(&self, calendar_id: i64) -> anyhow::Result<Option<Calendar>> {
        Ok(find(&calendar_id, &self.calendars))
    }
}
