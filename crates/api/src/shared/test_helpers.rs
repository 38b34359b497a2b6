use sac_event_feedback_domain::{
    Calendar, CalendarFeedbackSettings, Event, FeedbackProfile, FeedbackProfiles, Form,
    Instructor, Notification, Registration, Uuid,
};
use sac_event_feedback_infra::{FeedbackContext, InMemoryNotificationCenter, StaticTimeSys};
use std::collections::HashMap;
use std::sync::Arc;

pub const NOTIFICATION_ID: i64 = 7;
pub const PROFILE: &str = "tour";
pub const TOKEN_SECRET: &str = "test-secret";

pub struct TestContext {
    pub ctx: FeedbackContext,
    pub notification_center: Arc<InMemoryNotificationCenter>,
}

pub fn tour_profile() -> FeedbackProfile {
    FeedbackProfile {
        send_reminder_after_days: 1,
        reminder_expiration_days: 14,
        send_reminder_execution_delay: 0,
        feedback_page_url: "https://sac.example.org/feedback.html".parse().unwrap(),
        locale: "de".into(),
    }
}

/// Inmemory context with a fixed clock at `now` and one configured
/// feedback profile and notification
pub fn setup(now: i64) -> TestContext {
    let mut ctx = FeedbackContext::create_inmemory();
    ctx.sys = Arc::new(StaticTimeSys { timestamp: now });
    ctx.config.token_secret = TOKEN_SECRET.into();
    ctx.config.token_issuer = "localhost".into();
    ctx.config.admin_email = "admin@sac.example.org".into();
    ctx.config.reminder_batch_limit = 20;
    ctx.config.reminder_dispatch_grace_secs = 60;
    ctx.config.notification_timeout_secs = 5;
    let mut profiles = HashMap::new();
    profiles.insert(PROFILE.to_string(), tour_profile());
    ctx.config.feedback_profiles = FeedbackProfiles::new(profiles).unwrap();

    let notification_center = Arc::new(InMemoryNotificationCenter::new());
    notification_center.add_notification(Notification {
        id: NOTIFICATION_ID,
        title: "Feedback reminder".into(),
    });
    ctx.notification_center = notification_center.clone();

    TestContext {
        ctx,
        notification_center,
    }
}

/// Stores an event ending at `event_end` whose calendar is configured for
/// feedback, together with a registration that has participated
pub async fn insert_eligible_registration(
    ctx: &FeedbackContext,
    event_end: i64,
) -> (Event, Registration) {
    let form = ctx
        .repos
        .forms
        .insert(&Form {
            id: 0,
            title: "Tourenfeedback".into(),
        })
        .await
        .unwrap();
    let calendar = ctx
        .repos
        .calendars
        .insert(&Calendar {
            id: 0,
            title: "Touren".into(),
            feedback: CalendarFeedbackSettings::new(form.id, NOTIFICATION_ID, PROFILE),
        })
        .await
        .unwrap();
    let event = ctx
        .repos
        .events
        .insert(&Event {
            id: 0,
            calendar_id: calendar.id,
            title: "Hochtour Piz Palü".into(),
            end_date: event_end,
            main_instructor: Some(Instructor {
                name: "Anna Leiterin".into(),
                email: "anna@sac.example.org".into(),
            }),
        })
        .await
        .unwrap();
    let registration = insert_registration(ctx, &event, true).await;
    (event, registration)
}

pub async fn insert_registration(
    ctx: &FeedbackContext,
    event: &Event,
    has_participated: bool,
) -> Registration {
    ctx.repos
        .registrations
        .insert(&Registration {
            id: 0,
            uuid: Uuid::new_v4(),
            event_id: event.id,
            firstname: "Hans".into(),
            lastname: "Muster".into(),
            email: "hans@example.org".into(),
            has_participated,
            feedback_notification_count: 0,
        })
        .await
        .unwrap()
}
