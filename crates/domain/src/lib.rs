mod calendar;
mod eligibility;
mod event;
mod feedback;
mod form;
mod notification;
mod profile;
mod registration;
mod reminder;
mod shared;
mod token;

pub use calendar::{Calendar, CalendarFeedbackSettings};
pub use eligibility::{EligibilityError, EligibleFeedback};
pub use event::{Event, Instructor};
pub use feedback::Feedback;
pub use form::Form;
pub use notification::{Notification, ReceiptCollection, ReminderTokens};
pub use profile::{FeedbackProfile, FeedbackProfiles, ProfileError};
pub use registration::Registration;
pub use reminder::{NewReminder, Reminder};
pub use shared::entity::Entity;
pub use token::{FeedbackToken, FeedbackTokenClaims, TokenError};
pub use uuid::Uuid;
