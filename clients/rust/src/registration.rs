use crate::{APIResponse, BaseClient};
use reqwest::StatusCode;
use sac_event_feedback_api_structs::*;
use sac_event_feedback_domain::Uuid;
use std::sync::Arc;

#[derive(Clone)]
pub struct RegistrationClient {
    base: Arc<BaseClient>,
}

pub struct SetParticipationInput {
    pub uuid: Uuid,
    pub has_participated: bool,
}

impl RegistrationClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn set_participation(
        &self,
        input: SetParticipationInput,
    ) -> APIResponse<set_participation::APIResponse> {
        let body = set_participation::RequestBody {
            has_participated: input.has_participated,
        };
        self.base
            .put(
                body,
                format!("registrations/{}/participation", input.uuid),
                StatusCode::OK,
            )
            .await
    }
}
