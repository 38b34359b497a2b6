use crate::{APIResponse, BaseClient};
use reqwest::StatusCode;
use sac_event_feedback_api_structs::*;
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone)]
pub struct FeedbackClient {
    base: Arc<BaseClient>,
}

pub struct SubmitFeedbackInput {
    /// Token from the feedback link of the reminder
    pub token: String,
    pub answers: Value,
}

impl FeedbackClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn submit(
        &self,
        input: SubmitFeedbackInput,
    ) -> APIResponse<submit_feedback::APIResponse> {
        let body = submit_feedback::RequestBody {
            token: input.token,
            answers: input.answers,
        };
        self.base
            .post(body, "feedback".into(), StatusCode::CREATED)
            .await
    }
}
