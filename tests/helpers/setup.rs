use sac_event_feedback_api::Application;
use sac_event_feedback_domain::{FeedbackProfile, FeedbackProfiles, Notification};
use sac_event_feedback_infra::{FeedbackContext, InMemoryNotificationCenter};
use sac_event_feedback_sdk::FeedbackSDK;
use std::collections::HashMap;
use std::sync::Arc;

pub const NOTIFICATION_ID: i64 = 11;
pub const PROFILE: &str = "tour";

pub struct TestApp {
    /// Shares the repositories with the running application
    pub ctx: FeedbackContext,
    pub notification_center: Arc<InMemoryNotificationCenter>,
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, FeedbackSDK, String) {
    let mut ctx = FeedbackContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.reminder_job_interval_secs = 0; // Passes only run when triggered
    ctx.config.token_secret = "integration-test-secret".into();
    ctx.config.admin_email = "admin@sac.example.org".into();

    let mut profiles = HashMap::new();
    profiles.insert(
        PROFILE.to_string(),
        FeedbackProfile {
            send_reminder_after_days: 1,
            reminder_expiration_days: 14,
            send_reminder_execution_delay: 0,
            feedback_page_url: "https://sac.example.org/feedback.html"
                .parse()
                .expect("Valid feedback page url"),
            locale: "de".into(),
        },
    );
    ctx.config.feedback_profiles =
        FeedbackProfiles::new(profiles).expect("Valid feedback profiles");

    let notification_center = Arc::new(InMemoryNotificationCenter::new());
    notification_center.add_notification(Notification {
        id: NOTIFICATION_ID,
        title: "Wie war die Tour?".into(),
    });
    ctx.notification_center = notification_center.clone();

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp {
        ctx,
        notification_center,
    };
    let sdk = FeedbackSDK::new(address.clone());
    (app, sdk, address)
}
