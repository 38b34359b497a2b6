use crate::{
    error::FeedbackError,
    reminder::DeleteFeedbackRemindersUseCase,
    shared::usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpResponse};
use sac_event_feedback_api_structs::submit_feedback::*;
use sac_event_feedback_domain::{Feedback, FeedbackToken, TokenError};
use sac_event_feedback_infra::FeedbackContext;
use serde_json::Value;

fn handle_error(e: UseCaseError) -> FeedbackError {
    match e {
        UseCaseError::InvalidToken(e) => FeedbackError::Unauthorized(e.to_string()),
        UseCaseError::RegistrationNotFound(id) => FeedbackError::NotFound(format!(
            "The registration with id: {}, was not found.",
            id
        )),
        UseCaseError::AlreadySubmitted => FeedbackError::Conflict(
            "Feedback for this registration has already been submitted".into(),
        ),
        UseCaseError::StorageError => FeedbackError::InternalError,
    }
}

pub async fn submit_feedback_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<FeedbackContext>,
) -> Result<HttpResponse, FeedbackError> {
    let body = body.0;
    let usecase = SubmitFeedbackUseCase {
        token: body.token,
        answers: body.answers,
    };

    execute(usecase, &ctx)
        .await
        .map(|feedback| HttpResponse::Created().json(APIResponse::new(feedback)))
        .map_err(handle_error)
}

/// Stores the feedback of the registrant the token was issued for
#[derive(Debug)]
pub struct SubmitFeedbackUseCase {
    pub token: String,
    pub answers: Value,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidToken(TokenError),
    RegistrationNotFound(i64),
    AlreadySubmitted,
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SubmitFeedbackUseCase {
    type Response = Feedback;

    type Error = UseCaseError;

    const NAME: &'static str = "SubmitFeedback";

    async fn execute(&mut self, ctx: &FeedbackContext) -> Result<Self::Response, Self::Error> {
        let claims = FeedbackToken::verify(
            &self.token,
            &ctx.config.token_secret,
            &ctx.config.token_issuer,
        )
        .map_err(UseCaseError::InvalidToken)?;

        let registration = ctx
            .repos
            .registrations
            .find(claims.sub)
            .await
            .ok_or(UseCaseError::RegistrationNotFound(claims.sub))?;

        let existing = ctx
            .repos
            .feedbacks
            .find_by_uuid(&registration.uuid)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if !existing.is_empty() {
            return Err(UseCaseError::AlreadySubmitted);
        }

        let feedback = Feedback::new(
            registration.uuid,
            registration.event_id,
            self.answers.clone(),
            ctx.sys.get_timestamp(),
        );
        ctx.repos
            .feedbacks
            .insert(&feedback)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(feedback)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(DeleteRemindersOnFeedbackSubmitted)]
    }
}

/// Pending reminders are pointless once the feedback is in
pub struct DeleteRemindersOnFeedbackSubmitted;

#[async_trait::async_trait(?Send)]
impl Subscriber<SubmitFeedbackUseCase> for DeleteRemindersOnFeedbackSubmitted {
    async fn notify(&self, e: &Feedback, ctx: &FeedbackContext) {
        let delete_reminders = DeleteFeedbackRemindersUseCase { uuid: e.uuid };

        // Sideeffect, ignore result
        let _ = execute(delete_reminders, ctx).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::CreateFeedbackReminderUseCase;
    use crate::shared::test_helpers::{insert_eligible_registration, setup, TOKEN_SECRET};
    use serde_json::json;

    const NOW: i64 = 1_700_000_000;
    // Sat Jan 01 2100 00:00:00 GMT
    const FAR_FUTURE: i64 = 4_102_444_800;

    #[actix_web::test]
    async fn valid_token_stores_feedback_and_cancels_reminders() {
        let test = setup(NOW);
        let ctx = &test.ctx;
        let (event, registration) = insert_eligible_registration(ctx, NOW - 3600).await;
        let reminder = execute(
            CreateFeedbackReminderUseCase {
                registration: registration.clone(),
            },
            ctx,
        )
        .await
        .unwrap();
        assert!(reminder.is_some());

        let token =
            FeedbackToken::issue(registration.id, TOKEN_SECRET, FAR_FUTURE, "localhost").unwrap();
        let answers = json!({ "rating": 5, "comment": "Toller Tag" });
        let usecase = SubmitFeedbackUseCase {
            token: token.clone(),
            answers: answers.clone(),
        };
        let feedback = execute(usecase, ctx).await.unwrap();
        assert_eq!(feedback.uuid, registration.uuid);
        assert_eq!(feedback.event_id, event.id);
        assert_eq!(feedback.date_added, NOW);
        assert_eq!(feedback.answers, answers);

        let stored = ctx
            .repos
            .feedbacks
            .find_by_uuid(&registration.uuid)
            .await
            .unwrap();
        assert_eq!(stored, vec![feedback]);
        assert!(ctx
            .repos
            .reminders
            .find_by_uuid(&registration.uuid)
            .await
            .unwrap()
            .is_empty());

        // A second submission with the same link is rejected
        let mut usecase = SubmitFeedbackUseCase { token, answers };
        assert!(matches!(
            usecase.execute(ctx).await,
            Err(UseCaseError::AlreadySubmitted)
        ));
    }

    #[actix_web::test]
    async fn rejects_expired_and_forged_tokens() {
        let test = setup(NOW);
        let ctx = &test.ctx;
        let (_, registration) = insert_eligible_registration(ctx, NOW - 3600).await;

        let expired = FeedbackToken::issue(registration.id, TOKEN_SECRET, 1_000, "localhost").unwrap();
        let forged =
            FeedbackToken::issue(registration.id, "other-secret", FAR_FUTURE, "localhost").unwrap();
        for token in vec![expired, forged, "garbage".to_string()] {
            let mut usecase = SubmitFeedbackUseCase {
                token,
                answers: json!({}),
            };
            assert!(matches!(
                usecase.execute(ctx).await,
                Err(UseCaseError::InvalidToken(_))
            ));
        }
        assert!(ctx
            .repos
            .feedbacks
            .find_by_uuid(&registration.uuid)
            .await
            .unwrap()
            .is_empty());
    }
}
