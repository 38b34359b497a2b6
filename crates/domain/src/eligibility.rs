use crate::{Calendar, FeedbackProfile};
use thiserror::Error;

/// Why the feedback configuration of an `Event` cannot be used to send a
/// reminder. The `code` is meant for operators and ends up in the error log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EligibilityError {
    #[error("The calendar of the event does not exist")]
    CalendarNotFound,
    #[error("Online feedback is not enabled for the calendar of the event")]
    FeedbackDisabled,
    #[error("The feedback form of the calendar does not exist")]
    MissingForm,
    #[error("The reminder notification of the calendar does not exist")]
    MissingNotification,
    #[error("The feedback profile of the calendar is not configured")]
    MissingProfile,
}

impl EligibilityError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::CalendarNotFound => "ERR_CALENDAR_NOT_FOUND",
            Self::FeedbackDisabled => "ERR_FEEDBACK_DISABLED",
            Self::MissingForm => "ERR_MISSING_FORM",
            Self::MissingNotification => "ERR_MISSING_NOTIFICATION",
            Self::MissingProfile => "ERR_MISSING_PROFILE",
        }
    }
}

/// A feedback configuration that has been checked against the platform
#[derive(Debug, Clone, PartialEq)]
pub struct EligibleFeedback {
    pub calendar: Calendar,
    pub form_id: i64,
    pub notification_id: i64,
    pub profile: FeedbackProfile,
}
