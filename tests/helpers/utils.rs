use sac_event_feedback_domain::{
    Calendar, CalendarFeedbackSettings, Event, Form, Instructor, Registration, Uuid,
};
use sac_event_feedback_infra::FeedbackContext;
use url::Url;

use super::setup::{NOTIFICATION_ID, PROFILE};

/// Stores an event that ended `ended_secs_ago` in a calendar configured for
/// feedback, and a registration for it that has not been marked yet
pub async fn insert_registration(ctx: &FeedbackContext, ended_secs_ago: i64) -> Registration {
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
            title: "Sommertouren".into(),
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
            title: "Gratwanderung Niesen".into(),
            end_date: ctx.sys.get_timestamp() - ended_secs_ago,
            main_instructor: Some(Instructor {
                name: "Beat Bergführer".into(),
                email: "beat@sac.example.org".into(),
            }),
        })
        .await
        .unwrap();
    ctx.repos
        .registrations
        .insert(&Registration {
            id: 0,
            uuid: Uuid::new_v4(),
            event_id: event.id,
            firstname: "Vreni".into(),
            lastname: "Keller".into(),
            email: "vreni@example.org".into(),
            has_participated: false,
            feedback_notification_count: 0,
        })
        .await
        .unwrap()
}

/// The signed token carried by the `feedback_url` of a sent reminder
pub fn token_from_feedback_url(feedback_url: &str) -> String {
    let url = Url::parse(feedback_url).unwrap();
    url.query_pairs()
        .find(|(key, _)| key == "token")
        .map(|(_, token)| token.to_string())
        .unwrap()
}
