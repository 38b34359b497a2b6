use sac_event_feedback_domain::{Feedback, Uuid};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackDTO {
    pub id: Uuid,
    pub uuid: Uuid,
    pub event_id: i64,
    pub date_added: i64,
    pub answers: Value,
}

impl FeedbackDTO {
    pub fn new(feedback: Feedback) -> Self {
        Self {
            id: feedback.id,
            uuid: feedback.uuid,
            event_id: feedback.event_id,
            date_added: feedback.date_added,
            answers: feedback.answers,
        }
    }
}
