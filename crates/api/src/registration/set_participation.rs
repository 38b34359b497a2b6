use super::subscribers::{
    CreateReminderOnParticipationMarked, DeleteRemindersOnParticipationUnmarked,
};
use crate::{
    error::FeedbackError,
    shared::usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpResponse};
use sac_event_feedback_api_structs::set_participation::*;
use sac_event_feedback_domain::{Registration, Uuid};
use sac_event_feedback_infra::FeedbackContext;

fn handle_error(e: UseCaseError) -> FeedbackError {
    match e {
        UseCaseError::NotFound(uuid) => FeedbackError::NotFound(format!(
            "The registration with uuid: {}, was not found.",
            uuid
        )),
        UseCaseError::StorageError => FeedbackError::InternalError,
    }
}

pub async fn set_participation_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<FeedbackContext>,
) -> Result<HttpResponse, FeedbackError> {
    let usecase = SetParticipationUseCase {
        uuid: path_params.uuid,
        has_participated: body.has_participated,
    };

    let registration = execute(usecase, &ctx).await.map_err(handle_error)?;
    let reminders = ctx
        .repos
        .reminders
        .find_by_uuid(&registration.uuid)
        .await
        .map_err(|_| FeedbackError::InternalError)?;

    Ok(HttpResponse::Ok().json(APIResponse::new(registration, reminders)))
}

/// Saves whether the participant of a `Registration` took part in the
/// `Event`. Marking a participation schedules the feedback reminder,
/// unmarking it cancels pending reminders.
#[derive(Debug)]
pub struct SetParticipationUseCase {
    pub uuid: Uuid,
    pub has_participated: bool,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(Uuid),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetParticipationUseCase {
    type Response = Registration;

    type Error = UseCaseError;

    const NAME: &'static str = "SetParticipation";

    async fn execute(&mut self, ctx: &FeedbackContext) -> Result<Self::Response, Self::Error> {
        let mut registration = ctx
            .repos
            .registrations
            .find_by_uuid(&self.uuid)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or(UseCaseError::NotFound(self.uuid))?;

        registration.has_participated = self.has_participated;
        ctx.repos
            .registrations
            .save(&registration)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(registration)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![
            Box::new(CreateReminderOnParticipationMarked),
            Box::new(DeleteRemindersOnParticipationUnmarked),
        ]
    }
}
