use crate::shared::entity::Entity;
use serde_json::Value;
use uuid::Uuid;

/// A submitted event feedback
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub id: Uuid,
    /// The uuid of the `Registration` that gave the feedback
    pub uuid: Uuid,
    pub event_id: i64,
    pub date_added: i64,
    /// The submitted form values
    pub answers: Value,
}

impl Entity<Uuid> for Feedback {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Feedback {
    pub fn new(uuid: Uuid, event_id: i64, answers: Value, now: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            uuid,
            event_id,
            date_added: now,
            answers,
        }
    }
}
