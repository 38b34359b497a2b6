mod create_reminder;
mod delete_reminders;
mod dispatcher;
mod eligibility;
mod get_registration_reminders;
pub mod run_scheduling_pass;

use actix_web::web;
use get_registration_reminders::get_registration_reminders_controller;
use run_scheduling_pass::dispatch_reminders_controller;
use sac_event_feedback_domain::{EligibilityError, Uuid};
use thiserror::Error;

pub use create_reminder::{CreateFeedbackReminderUseCase, UseCaseError as CreateReminderError};
pub use delete_reminders::DeleteFeedbackRemindersUseCase;

/// Why a feedback reminder could not be created or sent
#[derive(Debug, Error)]
pub enum ReminderError {
    #[error("A reminder for registration {0} is already pending")]
    DuplicateReminder(Uuid),
    #[error("The feedback configuration is not usable: {} ({})", .0.code(), .0)]
    MisconfiguredFeedback(EligibilityError),
    #[error("The notification center did not accept the reminder")]
    TransientDispatchFailure,
    #[error("The scheduling pass was aborted: {0}")]
    TransactionFailure(String),
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/registrations/{uuid}/reminders",
        web::get().to(get_registration_reminders_controller),
    );
    cfg.route(
        "/reminders/dispatch",
        web::post().to(dispatch_reminders_controller),
    );
}
