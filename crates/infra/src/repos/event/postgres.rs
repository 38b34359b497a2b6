use super::IEventRepo;
use sac_event_feedback_domain::{Event, Instructor};
use sqlx::{FromRow, PgPool};
use tracing::error;

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EventRaw {
    event_id: i64,
    calendar_id: i64,
    title: String,
    end_date: i64,
    instructor_name: Option<String>,
    instructor_email: Option<String>,
}

impl From<EventRaw> for Event {
    fn from(e: EventRaw) -> Self {
        let main_instructor = match (e.instructor_name, e.instructor_email) {
            (Some(name), Some(email)) => Some(Instructor { name, email }),
            (Some(name), None) => Some(Instructor {
                name,
                email: String::new(),
            }),
            _ => None,
        };
        Self {
            id: e.event_id,
            calendar_id: e.calendar_id,
            title: e.title,
            end_date: e.end_date,
            main_instructor,
        }
    }
}

#[async_trait::async_trait]
impl IEventRepo for PostgresEventRepo {
    async fn insert(&self, event: &Event) -> anyhow::Result<Event> {
        let raw: EventRaw = sqlx::query_as(
            r#"
            INSERT INTO events
            (calendar_id, title, end_date, instructor_name, instructor_email)
            VALUES($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(event.calendar_id)
        .bind(&event.title)
        .bind(event.end_date)
        .bind(event.main_instructor.as_ref().map(|i| i.name.clone()))
        .bind(event.main_instructor.as_ref().map(|i| i.email.clone()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert event: {:?}. DB returned error: {:?}",
                event, e
            );
            e
        })?;
        Ok(raw.into())
    }

    async fn find(&self, event_id: i64) -> anyhow::Result<Option<Event>> {
        let res: Option<EventRaw> = sqlx::query_as(
            r#"
            SELECT * FROM events
            WHERE event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find event with id: {:?} failed. DB returned error: {:?}",
                event_id, e
            );
            e
        })?;
        Ok(res.map(|e| e.into()))
    }
}
