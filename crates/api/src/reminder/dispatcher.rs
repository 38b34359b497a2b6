use sac_event_feedback_domain::{
    EligibleFeedback, Event, FeedbackToken, Registration, Reminder, ReminderTokens, TokenError,
};
use sac_event_feedback_infra::FeedbackContext;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, PartialEq)]
pub enum DispatchOutcome {
    /// The notification center accepted this many messages
    Delivered(usize),
    /// The notification center did not accept any message
    Undelivered,
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("The notification center could not be reached: {0}")]
    Transport(anyhow::Error),
}

/// Builds the tokens of the feedback reminder and hands it to the
/// notification center. A delivered reminder is counted on the
/// `Registration`.
pub async fn dispatch_reminder(
    reminder: &Reminder,
    registration: &Registration,
    event: &Event,
    feedback: &EligibleFeedback,
    ctx: &FeedbackContext,
) -> Result<DispatchOutcome, DispatchError> {
    let token = FeedbackToken::issue(
        registration.id,
        &ctx.config.token_secret,
        reminder.expiration,
        &ctx.config.token_issuer,
    )?;
    let feedback_url = feedback.profile.feedback_url(&token);
    let tokens = ReminderTokens::new(
        registration,
        event,
        &ctx.config.admin_email,
        feedback_url.as_str(),
    );

    let receipts = ctx
        .notification_center
        .send(
            feedback.notification_id,
            &tokens.into_map(),
            &feedback.profile.locale,
        )
        .await
        .map_err(DispatchError::Transport)?;

    if receipts.count() == 0 {
        return Ok(DispatchOutcome::Undelivered);
    }

    if let Err(e) = ctx
        .repos
        .registrations
        .increment_notification_count(registration.id)
        .await
    {
        error!(
            "Unable to count the feedback notification of registration: {}. Error: {:?}",
            registration.uuid, e
        );
    }
    info!(
        target: "sac_event_feedback::audit",
        "Feedback reminder sent to {} ({}) for event \"{}\" ({})",
        registration.full_name(),
        registration.email,
        event.title,
        event.id
    );

    Ok(DispatchOutcome::Delivered(receipts.count()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::eligibility::check_eligibility;
    use crate::shared::test_helpers::{
        insert_eligible_registration, setup, NOTIFICATION_ID, TOKEN_SECRET,
    };
    use sac_event_feedback_domain::NewReminder;
    use url::Url;

    const NOW: i64 = 1_700_000_000;

    fn reminder_for(registration: &Registration) -> Reminder {
        NewReminder {
            uuid: registration.uuid,
            date_added: NOW - 1000,
            execution_date: NOW - 10,
            expiration: NOW + 3600,
        }
        .into_reminder(1)
    }

    #[actix_web::test]
    async fn delivers_reminder_with_tokens() {
        let test = setup(NOW);
        let (event, registration) = insert_eligible_registration(&test.ctx, NOW - 86_400).await;
        let feedback = check_eligibility(&event, &test.ctx).await.unwrap();
        let reminder = reminder_for(&registration);

        let outcome = dispatch_reminder(&reminder, &registration, &event, &feedback, &test.ctx)
            .await
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::Delivered(1));

        let sent = test.notification_center.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].notification_id, NOTIFICATION_ID);
        assert_eq!(sent[0].locale, "de");
        let tokens = &sent[0].tokens;
        assert_eq!(tokens.len(), 9);
        assert_eq!(tokens["instructor_name"], "Anna Leiterin");
        assert_eq!(tokens["instructor_email"], "anna@sac.example.org");
        assert_eq!(tokens["admin_email"], "admin@sac.example.org");
        assert_eq!(tokens["participant_firstname"], "Hans");
        assert_eq!(tokens["participant_lastname"], "Muster");
        assert_eq!(tokens["participant_email"], "hans@example.org");
        assert_eq!(tokens["participant_uuid"], registration.uuid.to_string());
        assert_eq!(tokens["event_name"], "Hochtour Piz Palü");

        let url = Url::parse(&tokens["feedback_url"]).unwrap();
        assert_eq!(url.path(), "/feedback.html");
        let (_, token) = url.query_pairs().find(|(key, _)| key == "token").unwrap();
        let claims = FeedbackToken::verify(&token, TOKEN_SECRET, "localhost").unwrap();
        assert_eq!(claims.sub, registration.id);
        assert_eq!(claims.exp, reminder.expiration);

        let registration = test.ctx.repos.registrations.find(registration.id).await.unwrap();
        assert_eq!(registration.feedback_notification_count, 1);
    }

    #[actix_web::test]
    async fn undelivered_reminder_is_not_counted() {
        let test = setup(NOW);
        let (event, registration) = insert_eligible_registration(&test.ctx, NOW - 86_400).await;
        let feedback = check_eligibility(&event, &test.ctx).await.unwrap();
        test.notification_center.reject_all();

        let outcome = dispatch_reminder(
            &reminder_for(&registration),
            &registration,
            &event,
            &feedback,
            &test.ctx,
        )
        .await
        .unwrap();
        assert_eq!(outcome, DispatchOutcome::Undelivered);
        let registration = test.ctx.repos.registrations.find(registration.id).await.unwrap();
        assert_eq!(registration.feedback_notification_count, 0);
    }

    #[actix_web::test]
    async fn transport_error() {
        let test = setup(NOW);
        let (event, registration) = insert_eligible_registration(&test.ctx, NOW - 86_400).await;
        let feedback = check_eligibility(&event, &test.ctx).await.unwrap();
        test.notification_center.go_offline();

        let res = dispatch_reminder(
            &reminder_for(&registration),
            &registration,
            &event,
            &feedback,
            &test.ctx,
        )
        .await;
        assert!(matches!(res, Err(DispatchError::Transport(_))));
    }
}
