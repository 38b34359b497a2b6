use super::ICalendarRepo;
use sac_event_feedback_domain::{Calendar, CalendarFeedbackSettings};
use sqlx::{FromRow, PgPool};
use tracing::error;

pub struct PostgresCalendarRepo {
    pool: PgPool,
}

impl PostgresCalendarRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CalendarRaw {
    calendar_id: i64,
    title: String,
    feedback_enabled: bool,
    feedback_form_id: Option<i64>,
    feedback_notification_id: Option<i64>,
    feedback_profile: Option<String>,
}

impl From<CalendarRaw> for Calendar {
    fn from(e: CalendarRaw) -> Self {
        Self {
            id: e.calendar_id,
            title: e.title,
            feedback: CalendarFeedbackSettings {
                enabled: e.feedback_enabled,
                form_id: e.feedback_form_id,
                notification_id: e.feedback_notification_id,
                profile: e.feedback_profile,
            },
        }
    }
}

#[async_trait::async_trait]
impl ICalendarRepo for PostgresCalendarRepo {
    async fn insert(&self, calendar: &Calendar) -> anyhow::Result<Calendar> {
        let raw: CalendarRaw = sqlx::query_as(
            r#"
            INSERT INTO calendars
            (title, feedback_enabled, feedback_form_id, feedback_notification_id, feedback_profile)
            VALUES($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&calendar.title)
        .bind(calendar.feedback.enabled)
        .bind(calendar.feedback.form_id)
        .bind(calendar.feedback.notification_id)
        .bind(&calendar.feedback.profile)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert calendar: {:?}. DB returned error: {:?}",
                calendar, e
            );
            e
        })?;
        Ok(raw.into())
    }

    async fn save(&self, calendar: &Calendar) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE calendars
            SET title = $2,
            feedback_enabled = $3,
            feedback_form_id = $4,
            feedback_notification_id = $5,
            feedback_profile = $6
            WHERE calendar_id = $1
            "#,
        )
        .bind(calendar.id)
        .bind(&calendar.title)
        .bind(calendar.feedback.enabled)
        .bind(calendar.feedback.form_id)
        .bind(calendar.feedback.notification_id)
        .bind(&calendar.feedback.profile)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save calendar: {:?}. DB returned error: {:?}",
                calendar, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, calendar_id: i64) -> anyhow::Result<Option<Calendar>> {
        let res: Option<CalendarRaw> = sqlx::query_as(
            r#"
            SELECT * FROM calendars
            WHERE calendar_id = $1
            "#,
        )
        .bind(calendar_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find calendar with id: {:?} failed. DB returned error: {:?}",
                calendar_id, e
            );
            e
        })?;
        Ok(res.map(|c| c.into()))
    }
}
