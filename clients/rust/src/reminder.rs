use crate::{APIResponse, BaseClient};
use reqwest::StatusCode;
use sac_event_feedback_api_structs::*;
use sac_event_feedback_domain::Uuid;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get_by_registration(
        &self,
        uuid: Uuid,
    ) -> APIResponse<get_registration_reminders::APIResponse> {
        self.base
            .get(format!("registrations/{}/reminders", uuid), StatusCode::OK)
            .await
    }

    /// Runs a scheduling pass, the way an external cron would trigger it
    pub async fn dispatch(&self, limit: Option<i64>) -> APIResponse<dispatch_reminders::APIResponse> {
        let body = dispatch_reminders::RequestBody { limit };
        self.base
            .post(body, "reminders/dispatch".into(), StatusCode::OK)
            .await
    }
}
