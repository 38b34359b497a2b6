use crate::shared::usecase::UseCase;
use sac_event_feedback_domain::Uuid;
use sac_event_feedback_infra::{DeleteResult, FeedbackContext};

/// Cancels every reminder of a registration
#[derive(Debug)]
pub struct DeleteFeedbackRemindersUseCase {
    pub uuid: Uuid,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteFeedbackRemindersUseCase {
    type Response = DeleteResult;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteFeedbackReminders";

    async fn execute(&mut self, ctx: &FeedbackContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .reminders
            .delete_by_uuid(&self.uuid)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
