use super::{IReminderRepo, IReminderTransaction, ReminderRepoError};
use crate::repos::shared::repo::DeleteResult;
use sac_event_feedback_domain::{NewReminder, Reminder, Uuid};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Clone, Default)]
struct ReminderTable {
    reminders: Vec<Reminder>,
    last_id: i64,
}

impl ReminderTable {
    fn due_for_dispatch(&self, now: i64, limit: i64) -> Vec<Reminder> {
        let mut due = self
            .reminders
            .iter()
            .filter(|r| r.is_due(now))
            .cloned()
            .collect::<Vec<_>>();
        due.sort_by_key(|r| r.id);
        due.truncate(limit.max(0) as usize);
        due
    }

    fn mark_dispatched(&mut self, reminder_id: i64, dispatch_time: i64) {
        if let Some(reminder) = self.reminders.iter_mut().find(|r| r.id == reminder_id) {
            reminder.mark_dispatched(dispatch_time);
        }
    }
}

/// Keeps reminders in memory. A transaction holds the table lock for its
/// whole lifetime and works on a copy of the table, which replaces the
/// table on commit. This gives the same guarantees as row locks in
/// postgres, only coarser.
pub struct InMemoryReminderRepo {
    table: Arc<Mutex<ReminderTable>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            table: Arc::new(Mutex::new(ReminderTable::default())),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &NewReminder) -> Result<Reminder, ReminderRepoError> {
        let mut table = self.table.lock().await;
        let duplicate = table
            .reminders
            .iter()
            .any(|r| r.uuid == reminder.uuid && r.execution_date == reminder.execution_date);
        if duplicate {
            return Err(ReminderRepoError::DuplicateKey {
                uuid: reminder.uuid,
                execution_date: reminder.execution_date,
            });
        }
        table.last_id += 1;
        let reminder = reminder.clone().into_reminder(table.last_id);
        table.reminders.push(reminder.clone());
        Ok(reminder)
    }

    async fn find(&self, reminder_id: i64) -> Option<Reminder> {
        let table = self.table.lock().await;
        table.reminders.iter().find(|r| r.id == reminder_id).cloned()
    }

    async fn find_by_uuid(&self, uuid: &Uuid) -> anyhow::Result<Vec<Reminder>> {
        let table = self.table.lock().await;
        Ok(table
            .reminders
            .iter()
            .filter(|r| r.uuid == *uuid)
            .cloned()
            .collect())
    }

    async fn find_due_for_dispatch(&self, now: i64, limit: i64) -> anyhow::Result<Vec<Reminder>> {
        let table = self.table.lock().await;
        Ok(table.due_for_dispatch(now, limit))
    }

    async fn mark_dispatched(&self, reminder_id: i64, dispatch_time: i64) -> anyhow::Result<()> {
        let mut table = self.table.lock().await;
        table.mark_dispatched(reminder_id, dispatch_time);
        Ok(())
    }

    async fn release(&self, reminder_ids: &[i64]) -> anyhow::Result<u64> {
        let mut table = self.table.lock().await;
        let mut released = 0;
        for reminder in table.reminders.iter_mut() {
            if reminder_ids.contains(&reminder.id) {
                reminder.release();
                released += 1;
            }
        }
        Ok(released)
    }

    async fn delete(&self, reminder_id: i64) -> anyhow::Result<bool> {
        let mut table = self.table.lock().await;
        let before = table.reminders.len();
        table.reminders.retain(|r| r.id != reminder_id);
        Ok(table.reminders.len() < before)
    }

    async fn delete_by_uuid(&self, uuid: &Uuid) -> anyhow::Result<DeleteResult> {
        let mut table = self.table.lock().await;
        let before = table.reminders.len();
        table.reminders.retain(|r| r.uuid != *uuid);
        Ok(DeleteResult {
            deleted_count: (before - table.reminders.len()) as i64,
        })
    }

    async fn begin(&self) -> anyhow::Result<Box<dyn IReminderTransaction>> {
        let guard = self.table.clone().lock_owned().await;
        let working_copy = guard.clone();
        Ok(Box::new(InMemoryReminderTransaction {
            guard,
            working_copy,
        }))
    }
}

pub struct InMemoryReminderTransaction {
    guard: OwnedMutexGuard<ReminderTable>,
    working_copy: ReminderTable,
}

#[async_trait::async_trait]
impl IReminderTransaction for InMemoryReminderTransaction {
    async fn purge_stale(&mut self, now: i64, grace_cutoff: i64) -> anyhow::Result<u64> {
        let before = self.working_copy.reminders.len();
        self.working_copy
            .reminders
            .retain(|r| !r.should_purge(now, grace_cutoff));
        Ok((before - self.working_copy.reminders.len()) as u64)
    }

    async fn lock_due_for_dispatch(&mut self, now: i64, limit: i64) -> anyhow::Result<Vec<Reminder>> {
        Ok(self.working_copy.due_for_dispatch(now, limit))
    }

    async fn mark_dispatched(&mut self, reminder_id: i64, dispatch_time: i64) -> anyhow::Result<()> {
        self.working_copy.mark_dispatched(reminder_id, dispatch_time);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> anyhow::Result<()> {
        let Self {
            mut guard,
            working_copy,
        } = *self;
        *guard = working_copy;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> anyhow::Result<()> {
        Ok(())
    }
}
