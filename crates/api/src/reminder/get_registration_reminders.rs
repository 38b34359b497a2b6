use crate::{
    error::FeedbackError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use sac_event_feedback_api_structs::get_registration_reminders::*;
use sac_event_feedback_domain::{Reminder, Uuid};
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

pub async fn get_registration_reminders_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<FeedbackContext>,
) -> Result<HttpResponse, FeedbackError> {
    let usecase = GetRegistrationRemindersUseCase {
        uuid: path_params.uuid,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct GetRegistrationRemindersUseCase {
    pub uuid: Uuid,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(Uuid),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetRegistrationRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetRegistrationReminders";

    async fn execute(&mut self, ctx: &FeedbackContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .registrations
            .find_by_uuid(&self.uuid)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or(UseCaseError::NotFound(self.uuid))?;

        ctx.repos
            .reminders
            .find_by_uuid(&self.uuid)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
