use crate::dtos::ReminderDTO;
use sac_event_feedback_domain::{Reminder, Uuid};
use serde::{Deserialize, Serialize};

pub mod get_registration_reminders {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub uuid: Uuid,
    }

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminders: Vec<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(reminders: Vec<Reminder>) -> Self {
            Self {
                reminders: reminders.into_iter().map(ReminderDTO::new).collect(),
            }
        }
    }
}

pub mod dispatch_reminders {
    use super::*;

    #[derive(Serialize, Deserialize, Debug, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// Maximum number of reminders to dispatch, defaults to the
        /// configured batch limit
        #[serde(default)]
        pub limit: Option<i64>,
    }

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub purged: u64,
        pub claimed: usize,
        pub dispatched: usize,
        pub undelivered: usize,
        pub skipped: usize,
        /// Reminders put back to pending for a later pass
        pub released: usize,
    }
}
