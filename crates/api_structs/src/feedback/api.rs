use crate::dtos::FeedbackDTO;
use sac_event_feedback_domain::Feedback;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod submit_feedback {
    use super::*;

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// The token from the link of the feedback reminder
        pub token: String,
        pub answers: Value,
    }

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub feedback: FeedbackDTO,
    }

    impl APIResponse {
        pub fn new(feedback: Feedback) -> Self {
            Self {
                feedback: FeedbackDTO::new(feedback),
            }
        }
    }
}
