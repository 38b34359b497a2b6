use crate::dtos::{RegistrationDTO, ReminderDTO};
use sac_event_feedback_domain::{Registration, Reminder, Uuid};
use serde::{Deserialize, Serialize};

pub mod set_participation {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub uuid: Uuid,
    }

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub has_participated: bool,
    }

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub registration: RegistrationDTO,
        /// Reminders of the registration after the participation was saved
        pub reminders: Vec<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(registration: Registration, reminders: Vec<Reminder>) -> Self {
            Self {
                registration: RegistrationDTO::new(registration),
                reminders: reminders.into_iter().map(ReminderDTO::new).collect(),
            }
        }
    }
}
