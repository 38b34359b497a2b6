use crate::{Event, Registration};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A notification template managed by the notification center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub title: String,
}

/// The messages the notification center accepted for sending
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceiptCollection {
    pub receipts: Vec<String>,
}

impl ReceiptCollection {
    pub fn count(&self) -> usize {
        self.receipts.len()
    }
}

/// The simple tokens the reminder notification template can use
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReminderTokens {
    pub instructor_name: String,
    pub instructor_email: String,
    pub admin_email: String,
    pub participant_firstname: String,
    pub participant_lastname: String,
    pub participant_email: String,
    pub participant_uuid: String,
    pub event_name: String,
    pub feedback_url: String,
}

impl ReminderTokens {
    pub fn new(
        registration: &Registration,
        event: &Event,
        admin_email: &str,
        feedback_url: &str,
    ) -> Self {
        Self {
            instructor_name: event.instructor_name().into(),
            instructor_email: event.instructor_email().into(),
            admin_email: admin_email.into(),
            participant_firstname: registration.firstname.clone(),
            participant_lastname: registration.lastname.clone(),
            participant_email: registration.email.clone(),
            participant_uuid: registration.uuid.to_string(),
            event_name: event.title.clone(),
            feedback_url: feedback_url.into(),
        }
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        let mut tokens = BTreeMap::new();
        tokens.insert("instructor_name".into(), self.instructor_name);
        tokens.insert("instructor_email".into(), self.instructor_email);
        tokens.insert("admin_email".into(), self.admin_email);
        tokens.insert("participant_firstname".into(), self.participant_firstname);
        tokens.insert("participant_lastname".into(), self.participant_lastname);
        tokens.insert("participant_email".into(), self.participant_email);
        tokens.insert("participant_uuid".into(), self.participant_uuid);
        tokens.insert("event_name".into(), self.event_name);
        tokens.insert("feedback_url".into(), self.feedback_url);
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Instructor;
    use uuid::Uuid;

    #[test]
    fn builds_tokens() {
        let registration = Registration {
            id: 7,
            uuid: Uuid::new_v4(),
            event_id: 3,
            firstname: "Hedi".into(),
            lastname: "Muster".into(),
            email: "hedi@example.org".into(),
            has_participated: true,
            feedback_notification_count: 0,
        };
        let mut event = Event {
            id: 3,
            calendar_id: 1,
            title: "Skitour Piz Palü".into(),
            end_date: 0,
            main_instructor: Some(Instructor {
                name: "Fritz Bergler".into(),
                email: "fritz@example.org".into(),
            }),
        };

        let tokens = ReminderTokens::new(
            &registration,
            &event,
            "admin@example.org",
            "https://example.org/feedback?token=x",
        )
        .into_map();
        assert_eq!(tokens.len(), 9);
        assert_eq!(tokens["instructor_name"], "Fritz Bergler");
        assert_eq!(tokens["participant_uuid"], registration.uuid.to_string());
        assert_eq!(tokens["event_name"], "Skitour Piz Palü");
        assert_eq!(tokens["feedback_url"], "https://example.org/feedback?token=x");

        event.main_instructor = None;
        let tokens = ReminderTokens::new(&registration, &event, "", "").into_map();
        assert_eq!(tokens["instructor_name"], "");
        assert_eq!(tokens["instructor_email"], "");
    }
}
