use sac_event_feedback_domain::{Reminder, Uuid};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: i64,
    pub uuid: Uuid,
    pub date_added: i64,
    pub execution_date: i64,
    pub expiration: i64,
    pub dispatched: bool,
    pub dispatch_time: Option<i64>,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            uuid: reminder.uuid,
            date_added: reminder.date_added,
            execution_date: reminder.execution_date,
            expiration: reminder.expiration,
            dispatched: reminder.dispatched,
            dispatch_time: reminder.dispatch_time,
        }
    }
}
