use crate::shared::entity::Entity;
use serde::{Deserialize, Serialize};

/// A `Calendar` groups `Event`s and decides whether participants of
/// those events are asked for feedback
#[derive(Debug, Clone, PartialEq)]
pub struct Calendar {
    pub id: i64,
    pub title: String,
    pub feedback: CalendarFeedbackSettings,
}

impl Entity<i64> for Calendar {
    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarFeedbackSettings {
    pub enabled: bool,
    /// The `Form` participants fill in
    pub form_id: Option<i64>,
    /// The notification center template used for reminders
    pub notification_id: Option<i64>,
    /// Name of the `FeedbackProfile` to use
    pub profile: Option<String>,
}

impl CalendarFeedbackSettings {
    pub fn new(form_id: i64, notification_id: i64, profile: &str) -> Self {
        Self {
            enabled: true,
            form_id: Some(form_id),
            notification_id: Some(notification_id),
            profile: Some(profile.into()),
        }
    }
}
