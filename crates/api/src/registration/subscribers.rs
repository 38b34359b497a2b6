use super::set_participation::SetParticipationUseCase;
use crate::reminder::{
    CreateFeedbackReminderUseCase, CreateReminderError, DeleteFeedbackRemindersUseCase,
    ReminderError,
};
use crate::shared::usecase::{execute, Subscriber, UseCase};
use sac_event_feedback_domain::Registration;
use sac_event_feedback_infra::FeedbackContext;
use tracing::{debug, error};

/// A reminder that is still pending is expected when a participation is
/// saved more than once
fn is_pending_duplicate(e: &CreateReminderError) -> bool {
    matches!(
        e,
        CreateReminderError::Reminder(ReminderError::DuplicateReminder(_))
    )
}

pub struct CreateReminderOnParticipationMarked;

#[async_trait::async_trait(?Send)]
impl Subscriber<SetParticipationUseCase> for CreateReminderOnParticipationMarked {
    async fn notify(&self, e: &Registration, ctx: &FeedbackContext) {
        if !e.has_participated {
            return;
        }
        let mut create_reminder = CreateFeedbackReminderUseCase {
            registration: e.clone(),
        };

        // Sideeffect, only logged
        match create_reminder.execute(ctx).await {
            Ok(Some(reminder)) => debug!(
                "Scheduled feedback reminder {} for registration {} at {}",
                reminder.id, reminder.uuid, reminder.execution_date
            ),
            Ok(None) => (),
            Err(err) if is_pending_duplicate(&err) => debug!(
                "Registration {} already has a pending feedback reminder",
                e.uuid
            ),
            Err(err) => error!(
                "Unable to schedule the feedback reminder of registration {}: {:?}",
                e.uuid, err
            ),
        }
    }
}

pub struct DeleteRemindersOnParticipationUnmarked;

#[async_trait::async_trait(?Send)]
impl Subscriber<SetParticipationUseCase> for DeleteRemindersOnParticipationUnmarked {
    async fn notify(&self, e: &Registration, ctx: &FeedbackContext) {
        if e.has_participated {
            return;
        }
        let delete_reminders = DeleteFeedbackRemindersUseCase { uuid: e.uuid };

        // Sideeffect, ignore result
        let _ = execute(delete_reminders, ctx).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{insert_eligible_registration, setup};
    use sac_event_feedback_domain::{EligibilityError, Uuid};

    #[test]
    fn only_pending_duplicates_are_expected() {
        assert!(is_pending_duplicate(&CreateReminderError::Reminder(
            ReminderError::DuplicateReminder(Uuid::new_v4())
        )));
        assert!(!is_pending_duplicate(&CreateReminderError::StorageError));
        assert!(!is_pending_duplicate(&CreateReminderError::Reminder(
            ReminderError::MisconfiguredFeedback(EligibilityError::MissingForm)
        )));
    }

    #[actix_web::test]
    async fn saving_participation_twice_keeps_one_reminder() {
        let test = setup(1_700_000_000);
        let ctx = &test.ctx;
        let (_, registration) = insert_eligible_registration(ctx, 1_700_000_000 - 3600).await;

        CreateReminderOnParticipationMarked
            .notify(&registration, ctx)
            .await;
        CreateReminderOnParticipationMarked
            .notify(&registration, ctx)
            .await;
        let reminders = ctx
            .repos
            .reminders
            .find_by_uuid(&registration.uuid)
            .await
            .unwrap();
        assert_eq!(reminders.len(), 1);
    }
}
