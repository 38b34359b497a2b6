use super::{
    eligibility::{check_eligibility, CheckError},
    ReminderError,
};
use crate::shared::usecase::UseCase;
use sac_event_feedback_domain::{NewReminder, Registration, Reminder};
use sac_event_feedback_infra::{FeedbackContext, ReminderRepoError};
use tracing::debug;

/// Schedules the feedback reminder of a `Registration` that has been marked
/// as participated. Returns `None` when no reminder is needed.
#[derive(Debug)]
pub struct CreateFeedbackReminderUseCase {
    pub registration: Registration,
}

#[derive(Debug)]
pub enum UseCaseError {
    Reminder(ReminderError),
    EventNotFound(i64),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateFeedbackReminderUseCase {
    type Response = Option<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateFeedbackReminder";

    async fn execute(&mut self, ctx: &FeedbackContext) -> Result<Self::Response, Self::Error> {
        let registration = &self.registration;
        if !registration.has_participated {
            return Ok(None);
        }
        if registration.has_received_feedback_notification() {
            debug!(
                "Registration {} already received a feedback notification",
                registration.uuid
            );
            return Ok(None);
        }

        let feedbacks = ctx
            .repos
            .feedbacks
            .find_by_uuid(&registration.uuid)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if !feedbacks.is_empty() {
            debug!("Registration {} already gave feedback", registration.uuid);
            return Ok(None);
        }

        let now = ctx.sys.get_timestamp();
        let pending = ctx
            .repos
            .reminders
            .find_by_uuid(&registration.uuid)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if pending.iter().any(|r| !r.dispatched && !r.is_expired(now)) {
            return Err(UseCaseError::Reminder(ReminderError::DuplicateReminder(
                registration.uuid,
            )));
        }

        let event = ctx
            .repos
            .events
            .find(registration.event_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or(UseCaseError::EventNotFound(registration.event_id))?;
        let feedback = check_eligibility(&event, ctx).await.map_err(|e| match e {
            CheckError::NotEligible(e) => {
                UseCaseError::Reminder(ReminderError::MisconfiguredFeedback(e))
            }
            CheckError::Unavailable(_) => UseCaseError::StorageError,
        })?;

        let new_reminder =
            match NewReminder::for_event(registration.uuid, event.end_date, &feedback.profile, now)
            {
                Some(reminder) => reminder,
                None => {
                    debug!(
                        "The feedback window of event {} is over, no reminder for registration {}",
                        event.id, registration.uuid
                    );
                    return Ok(None);
                }
            };

        match ctx.repos.reminders.insert(&new_reminder).await {
            Ok(reminder) => Ok(Some(reminder)),
            Err(ReminderRepoError::DuplicateKey { uuid, .. }) => Err(UseCaseError::Reminder(
                ReminderError::DuplicateReminder(uuid),
            )),
            Err(ReminderRepoError::Storage(_)) => Err(UseCaseError::StorageError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{insert_eligible_registration, insert_registration, setup};
    use sac_event_feedback_domain::{EligibilityError, Feedback};
    use serde_json::json;

    const NOW: i64 = 1_700_000_000;
    const DAY: i64 = 86_400;

    #[actix_web::test]
    async fn schedules_reminder_with_profile_dates() {
        let test = setup(NOW);
        let event_end = NOW - 3600;
        let (_, registration) = insert_eligible_registration(&test.ctx, event_end).await;

        let mut usecase = CreateFeedbackReminderUseCase {
            registration: registration.clone(),
        };
        let reminder = usecase.execute(&test.ctx).await.unwrap().unwrap();
        assert_eq!(reminder.uuid, registration.uuid);
        assert_eq!(reminder.date_added, NOW);
        assert_eq!(reminder.execution_date, event_end + DAY);
        assert_eq!(reminder.expiration, event_end + 14 * DAY);
        assert!(!reminder.dispatched);

        // A second reminder for the same registration is refused
        let res = usecase.execute(&test.ctx).await;
        assert!(matches!(
            res,
            Err(UseCaseError::Reminder(ReminderError::DuplicateReminder(_)))
        ));
        let reminders = test
            .ctx
            .repos
            .reminders
            .find_by_uuid(&registration.uuid)
            .await
            .unwrap();
        assert_eq!(reminders.len(), 1);
    }

    #[actix_web::test]
    async fn skips_registrations_that_need_no_reminder() {
        let test = setup(NOW);
        let ctx = &test.ctx;
        let (event, mut registration) = insert_eligible_registration(ctx, NOW - 3600).await;

        // Not participated
        let absent = insert_registration(ctx, &event, false).await;
        let mut usecase = CreateFeedbackReminderUseCase {
            registration: absent,
        };
        assert_eq!(usecase.execute(ctx).await.unwrap(), None);

        // Already notified
        registration.feedback_notification_count = 1;
        let mut usecase = CreateFeedbackReminderUseCase {
            registration: registration.clone(),
        };
        assert_eq!(usecase.execute(ctx).await.unwrap(), None);

        // Feedback already given
        registration.feedback_notification_count = 0;
        ctx.repos
            .feedbacks
            .insert(&Feedback::new(registration.uuid, event.id, json!({}), NOW))
            .await
            .unwrap();
        let mut usecase = CreateFeedbackReminderUseCase { registration };
        assert_eq!(usecase.execute(ctx).await.unwrap(), None);
    }

    #[actix_web::test]
    async fn skips_events_with_closed_feedback_window() {
        let test = setup(NOW);
        let (_, registration) = insert_eligible_registration(&test.ctx, NOW - 14 * DAY).await;

        let mut usecase = CreateFeedbackReminderUseCase { registration };
        assert_eq!(usecase.execute(&test.ctx).await.unwrap(), None);
    }

    #[actix_web::test]
    async fn rejects_ineligible_events() {
        let test = setup(NOW);
        let (event, registration) = insert_eligible_registration(&test.ctx, NOW - 3600).await;
        let mut calendar = test
            .ctx
            .repos
            .calendars
            .find(event.calendar_id)
            .await
            .unwrap()
            .unwrap();
        calendar.feedback.enabled = false;
        test.ctx.repos.calendars.save(&calendar).await.unwrap();

        let mut usecase = CreateFeedbackReminderUseCase {
            registration: registration.clone(),
        };
        match usecase.execute(&test.ctx).await {
            Err(UseCaseError::Reminder(ReminderError::MisconfiguredFeedback(e))) => {
                assert_eq!(e, EligibilityError::FeedbackDisabled)
            }
            res => panic!("Expected misconfigured feedback, got: {:?}", res),
        }
        assert!(test
            .ctx
            .repos
            .reminders
            .find_by_uuid(&registration.uuid)
            .await
            .unwrap()
            .is_empty());
    }
}
