use crate::shared::entity::Entity;
use uuid::Uuid;

/// A member's registration for an `Event`
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub id: i64,
    pub uuid: Uuid,
    pub event_id: i64,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    /// Set by the event instructor once the event is over
    pub has_participated: bool,
    /// How many feedback notifications have been sent to this participant
    pub feedback_notification_count: i64,
}

impl Entity<i64> for Registration {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Registration {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }

    pub fn has_received_feedback_notification(&self) -> bool {
        self.feedback_notification_count > 0
    }
}
