mod base;
mod feedback;
mod registration;
mod reminder;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
use feedback::FeedbackClient;
pub use feedback::SubmitFeedbackInput;
use registration::RegistrationClient;
pub use registration::SetParticipationInput;
use reminder::ReminderClient;
pub use sac_event_feedback_api_structs::dtos::*;
pub use sac_event_feedback_domain::Uuid;
use status::StatusClient;
use std::sync::Arc;

// Domain
pub use sac_event_feedback_api_structs::dtos::FeedbackDTO as Feedback;
pub use sac_event_feedback_api_structs::dtos::RegistrationDTO as Registration;
pub use sac_event_feedback_api_structs::dtos::ReminderDTO as Reminder;

/// SAC Event Feedback SDK
///
/// The SDK contains methods for interacting with the event feedback server
/// API.
#[derive(Clone)]
pub struct FeedbackSDK {
    pub feedback: FeedbackClient,
    pub registration: RegistrationClient,
    pub reminder: ReminderClient,
    pub status: StatusClient,
}

impl FeedbackSDK {
    pub fn new(address: String) -> Self {
        let base = Arc::new(BaseClient::new(address));
        let feedback = FeedbackClient::new(base.clone());
        let registration = RegistrationClient::new(base.clone());
        let reminder = ReminderClient::new(base.clone());
        let status = StatusClient::new(base);

        Self {
            feedback,
            registration,
            reminder,
            status,
        }
    }
}
