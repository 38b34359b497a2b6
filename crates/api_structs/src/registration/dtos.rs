use sac_event_feedback_domain::{Registration, Uuid};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDTO {
    pub id: i64,
    pub uuid: Uuid,
    pub event_id: i64,
    pub firstname: String,
    pub lastname: String,
    pub has_participated: bool,
    pub feedback_notification_count: i64,
}

impl RegistrationDTO {
    pub fn new(registration: Registration) -> Self {
        Self {
            id: registration.id,
            uuid: registration.uuid,
            event_id: registration.event_id,
            firstname: registration.firstname,
            lastname: registration.lastname,
            has_participated: registration.has_participated,
            feedback_notification_count: registration.feedback_notification_count,
        }
    }
}
