use super::{IReminderRepo, IReminderTransaction, ReminderRepoError};
use crate::repos::shared::repo::DeleteResult;
use sac_event_feedback_domain::{NewReminder, Reminder};
use sqlx::{types::Uuid, FromRow, PgPool, Postgres, Transaction};
use tracing::error;

const UNIQUE_VIOLATION: &str = "23505";

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    id: i64,
    uuid: Uuid,
    date_added: i64,
    execution_date: i64,
    expiration: i64,
    dispatched: bool,
    dispatch_time: Option<i64>,
}

impl From<ReminderRaw> for Reminder {
    fn from(e: ReminderRaw) -> Self {
        Self {
            id: e.id,
            uuid: e.uuid,
            date_added: e.date_added,
            execution_date: e.execution_date,
            expiration: e.expiration,
            dispatched: e.dispatched,
            dispatch_time: e.dispatch_time,
        }
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &NewReminder) -> Result<Reminder, ReminderRepoError> {
        let res = sqlx::query_as::<_, ReminderRaw>(
            r#"
            INSERT INTO event_feedback_reminders
            (uuid, date_added, execution_date, expiration)
            VALUES($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(reminder.uuid)
        .bind(reminder.date_added)
        .bind(reminder.execution_date)
        .bind(reminder.expiration)
        .fetch_one(&self.pool)
        .await;

        match res {
            Ok(raw) => Ok(raw.into()),
            Err(e) if is_unique_violation(&e) => Err(ReminderRepoError::DuplicateKey {
                uuid: reminder.uuid,
                execution_date: reminder.execution_date,
            }),
            Err(e) => {
                error!(
                    "Unable to insert reminder: {:?}. DB returned error: {:?}",
                    reminder, e
                );
                Err(ReminderRepoError::Storage(e.into()))
            }
        }
    }

    async fn find(&self, reminder_id: i64) -> Option<Reminder> {
        let res: Option<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM event_feedback_reminders
            WHERE id = $1
            "#,
        )
        .bind(reminder_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find reminder with id: {:?} failed. DB returned error: {:?}",
                reminder_id, e
            );
            e
        })
        .ok()?;
        res.map(|r| r.into())
    }

    async fn find_by_uuid(&self, uuid: &Uuid) -> anyhow::Result<Vec<Reminder>> {
        let reminders: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM event_feedback_reminders
            WHERE uuid = $1
            ORDER BY id
            "#,
        )
        .bind(uuid)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find reminders for registration: {:?} failed. DB returned error: {:?}",
                uuid, e
            );
            e
        })?;
        Ok(reminders.into_iter().map(|r| r.into()).collect())
    }

    async fn find_due_for_dispatch(&self, now: i64, limit: i64) -> anyhow::Result<Vec<Reminder>> {
        let reminders: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM event_feedback_reminders
            WHERE expiration > $1 AND execution_date <= $1 AND dispatched = FALSE
            ORDER BY id
            LIMIT $2
            "#,
        )
        .bind(now)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(reminders.into_iter().map(|r| r.into()).collect())
    }

    async fn mark_dispatched(&self, reminder_id: i64, dispatch_time: i64) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE event_feedback_reminders
            SET dispatched = TRUE, dispatch_time = $2
            WHERE id = $1
            "#,
        )
        .bind(reminder_id)
        .bind(dispatch_time)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn release(&self, reminder_ids: &[i64]) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"
            UPDATE event_feedback_reminders
            SET dispatched = FALSE, dispatch_time = NULL
            WHERE id = ANY($1)
            "#,
        )
        .bind(reminder_ids)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to release reminders: {:?}. DB returned error: {:?}",
                reminder_ids, e
            );
            e
        })?;
        Ok(res.rows_affected())
    }

    async fn delete(&self, reminder_id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            DELETE FROM event_feedback_reminders
            WHERE id = $1
            "#,
        )
        .bind(reminder_id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete_by_uuid(&self, uuid: &Uuid) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM event_feedback_reminders
            WHERE uuid = $1
            "#,
        )
        .bind(uuid)
        .execute(&self.pool)
        .await?;
        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }

    async fn begin(&self) -> anyhow::Result<Box<dyn IReminderTransaction>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PostgresReminderTransaction { tx }))
    }
}

pub struct PostgresReminderTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait::async_trait]
impl IReminderTransaction for PostgresReminderTransaction {
    async fn purge_stale(&mut self, now: i64, grace_cutoff: i64) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"
            DELETE FROM event_feedback_reminders
            WHERE expiration < $1 OR dispatch_time < $2
            "#,
        )
        .bind(now)
        .bind(grace_cutoff)
        .execute(&mut *self.tx)
        .await?;
        Ok(res.rows_affected())
    }

    async fn lock_due_for_dispatch(&mut self, now: i64, limit: i64) -> anyhow::Result<Vec<Reminder>> {
        // Without SKIP LOCKED a concurrent pass waits for our commit and then
        // re-evaluates the filter, which excludes the rows we claimed
        let reminders: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM event_feedback_reminders
            WHERE expiration > $1 AND execution_date <= $1 AND dispatched = FALSE
            ORDER BY id
            LIMIT $2
            FOR UPDATE
            "#,
        )
        .bind(now)
        .bind(limit)
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(reminders.into_iter().map(|r| r.into()).collect())
    }

    async fn mark_dispatched(&mut self, reminder_id: i64, dispatch_time: i64) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE event_feedback_reminders
            SET dispatched = TRUE, dispatch_time = $2
            WHERE id = $1
            "#,
        )
        .bind(reminder_id)
        .bind(dispatch_time)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> anyhow::Result<()> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> anyhow::Result<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}
