mod calendar;
mod event;
mod feedback;
mod form;
mod registration;
mod reminder;
mod shared;

use calendar::{InMemoryCalendarRepo, PostgresCalendarRepo};
use event::{InMemoryEventRepo, PostgresEventRepo};
use feedback::{InMemoryFeedbackRepo, PostgresFeedbackRepo};
use form::{InMemoryFormRepo, PostgresFormRepo};
use registration::{InMemoryRegistrationRepo, PostgresRegistrationRepo};
use reminder::{InMemoryReminderRepo, PostgresReminderRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

pub use calendar::ICalendarRepo;
pub use event::IEventRepo;
pub use feedback::IFeedbackRepo;
pub use form::IFormRepo;
pub use registration::IRegistrationRepo;
pub use reminder::{IReminderRepo, IReminderTransaction, ReminderRepoError};
pub use shared::repo::DeleteResult;

#[derive(Clone)]
pub struct Repos {
    pub reminders: Arc<dyn IReminderRepo>,
    pub registrations: Arc<dyn IRegistrationRepo>,
    pub events: Arc<dyn IEventRepo>,
    pub calendars: Arc<dyn ICalendarRepo>,
    pub forms: Arc<dyn IFormRepo>,
    pub feedbacks: Arc<dyn IFeedbackRepo>,
}

impl Repos {
    pub async fn create_postgres(
        connection_string: &str,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");
        Ok(Self {
            reminders: Arc::new(PostgresReminderRepo::new(pool.clone())),
            registrations: Arc::new(PostgresRegistrationRepo::new(pool.clone())),
            events: Arc::new(PostgresEventRepo::new(pool.clone())),
            calendars: Arc::new(PostgresCalendarRepo::new(pool.clone())),
            forms: Arc::new(PostgresFormRepo::new(pool.clone())),
            feedbacks: Arc::new(PostgresFeedbackRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            reminders: Arc::new(InMemoryReminderRepo::new()),
            registrations: Arc::new(InMemoryRegistrationRepo::new()),
            events: Arc::new(InMemoryEventRepo::new()),
            calendars: Arc::new(InMemoryCalendarRepo::new()),
            forms: Arc::new(InMemoryFormRepo::new()),
            feedbacks: Arc::new(InMemoryFeedbackRepo::new()),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::FeedbackContext;
    use sac_event_feedback_domain::{Calendar, CalendarFeedbackSettings, Event};

    /// The inmemory context and, when `DATABASE_URL` is set, a postgres
    /// context
    pub async fn create_contexts() -> Vec<FeedbackContext> {
        let mut contexts = vec![FeedbackContext::create_inmemory()];
        if std::env::var("DATABASE_URL").is_ok() {
            crate::run_migration().await.unwrap();
            contexts.push(crate::setup_context().await);
        }
        contexts
    }

    pub async fn insert_calendar(ctx: &FeedbackContext) -> Calendar {
        ctx.repos
            .calendars
            .insert(&Calendar {
                id: 0,
                title: "Touren".into(),
                feedback: CalendarFeedbackSettings::default(),
            })
            .await
            .unwrap()
    }

    pub async fn insert_event(ctx: &FeedbackContext) -> Event {
        let calendar = insert_calendar(ctx).await;
        ctx.repos
            .events
            .insert(&Event {
                id: 0,
                calendar_id: calendar.id,
                title: "Skitour".into(),
                end_date: 1_600_000_000,
                main_instructor: None,
            })
            .await
            .unwrap()
    }
}
