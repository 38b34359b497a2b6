use super::IRegistrationRepo;
use crate::repos::shared::inmemory_repo::*;
use sac_event_feedback_domain::{Registration, Uuid};
use std::sync::atomic::{AtomicI64, Ordering};

pub struct InMemoryRegistrationRepo {
    registrations: std::sync::Mutex<Vec<Registration>>,
    last_id: AtomicI64,
}

impl InMemoryRegistrationRepo {
    pub fn new() -> Self {
        Self {
            registrations: std::sync::Mutex::new(Vec::new()),
            last_id: AtomicI64::new(0),
        }
    }
}

#[async_trait::async_trait]
impl IRegistrationRepo for InMemoryRegistrationRepo {
    async fn insert(&self, registration: &Registration) -> anyhow::Result<Registration> {
        let mut registration = registration.clone();
        registration.id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        insert(&registration, &self.registrations);
        Ok(registration)
    }

    async fn save(&self, registration: &Registration) -> anyhow::Result<()> {
        save(registration, &self.registrations);
        Ok(())
    }

    async fn find(&self, registration_id: i64) -> Option<Registration> {
        find(&registration_id, &self.registrations)
    }

    async fn find_by_uuid(&self, uuid: &Uuid) -> anyhow::Result<Option<Registration>> {
        let registrations = find_by(&self.registrations, |r| r.uuid == *uuid);
        Ok(registrations.into_iter().next())
    }

    async fn increment_notification_count(&self, registration_id: i64) -> anyhow::Result<i64> {
        update_many(
            &self.registrations,
            |r| r.id == registration_id,
            |r| r.feedback_notification_count += 1,
        );
        let registration = find(&registration_id, &self.registrations)
            .ok_or_else(|| anyhow::anyhow!("Registration {} not found", registration_id))?;
        Ok(registration.feedback_notification_count)
    }
}
