mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;

use crate::repos::shared::repo::DeleteResult;
use sac_event_feedback_domain::{NewReminder, Reminder, Uuid};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReminderRepoError {
    #[error("A reminder for registration {uuid} at {execution_date} already exists")]
    DuplicateKey { uuid: Uuid, execution_date: i64 },
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &NewReminder) -> Result<Reminder, ReminderRepoError>;
    async fn find(&self, reminder_id: i64) -> Option<Reminder>;
    async fn find_by_uuid(&self, uuid: &Uuid) -> anyhow::Result<Vec<Reminder>>;
    /// Reminders that are due at `now`, ordered by id. Does not lock
    /// anything, use `IReminderTransaction::lock_due_for_dispatch` to claim
    /// reminders.
    async fn find_due_for_dispatch(&self, now: i64, limit: i64) -> anyhow::Result<Vec<Reminder>>;
    async fn mark_dispatched(&self, reminder_id: i64, dispatch_time: i64) -> anyhow::Result<()>;
    /// Puts claimed reminders back into the pending state
    async fn release(&self, reminder_ids: &[i64]) -> anyhow::Result<u64>;
    /// Returns false if there was nothing to delete
    async fn delete(&self, reminder_id: i64) -> anyhow::Result<bool>;
    async fn delete_by_uuid(&self, uuid: &Uuid) -> anyhow::Result<DeleteResult>;
    async fn begin(&self) -> anyhow::Result<Box<dyn IReminderTransaction>>;
}

/// Reminder operations that run inside one database transaction.
///
/// Rows returned by `lock_due_for_dispatch` stay locked until the
/// transaction is committed or rolled back, so a concurrent caller selecting
/// the same rows waits and then sees them claimed. Dropping the transaction
/// without committing rolls it back.
#[async_trait::async_trait]
pub trait IReminderTransaction: Send {
    /// Deletes expired reminders and dispatched reminders whose dispatch time
    /// lies before `grace_cutoff`
    async fn purge_stale(&mut self, now: i64, grace_cutoff: i64) -> anyhow::Result<u64>;
    async fn lock_due_for_dispatch(&mut self, now: i64, limit: i64) -> anyhow::Result<Vec<Reminder>>;
    async fn mark_dispatched(&mut self, reminder_id: i64, dispatch_time: i64) -> anyhow::Result<()>;
    async fn commit(self: Box<Self>) -> anyhow::Result<()>;
    async fn rollback(self: Box<Self>) -> anyhow::Result<()>;
}
