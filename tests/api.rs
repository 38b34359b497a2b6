mod helpers;

use helpers::setup::spawn_app;
use helpers::utils::{insert_registration, token_from_feedback_url};
use sac_event_feedback_sdk::{APIErrorVariant, SetParticipationInput, SubmitFeedbackInput, Uuid};
use serde_json::json;

const DAY: i64 = 24 * 60 * 60;

#[actix_web::main]
#[test]
async fn test_status_ok() {
    let (_, sdk, _) = spawn_app().await;
    assert!(sdk.status.check_health().await.is_ok());
}

#[actix_web::main]
#[test]
async fn test_participation_schedules_and_cancels_reminder() {
    let (app, sdk, _) = spawn_app().await;
    let registration = insert_registration(&app.ctx, 2 * 60 * 60).await;

    let res = sdk
        .registration
        .set_participation(SetParticipationInput {
            uuid: registration.uuid,
            has_participated: true,
        })
        .await
        .expect("To mark participation");
    assert!(res.registration.has_participated);
    assert_eq!(res.reminders.len(), 1);
    let reminder = &res.reminders[0];
    assert!(!reminder.dispatched);
    assert_eq!(reminder.expiration - reminder.execution_date, 13 * DAY);

    // Saving the same flag again does not schedule a second reminder
    let res = sdk
        .registration
        .set_participation(SetParticipationInput {
            uuid: registration.uuid,
            has_participated: true,
        })
        .await
        .unwrap();
    assert_eq!(res.reminders.len(), 1);

    let res = sdk
        .registration
        .set_participation(SetParticipationInput {
            uuid: registration.uuid,
            has_participated: false,
        })
        .await
        .unwrap();
    assert!(!res.registration.has_participated);
    assert!(res.reminders.is_empty());
    let res = sdk
        .reminder
        .get_by_registration(registration.uuid)
        .await
        .unwrap();
    assert!(res.reminders.is_empty());
}

#[actix_web::main]
#[test]
async fn test_unknown_registration() {
    let (_, sdk, _) = spawn_app().await;
    let err = sdk
        .registration
        .set_participation(SetParticipationInput {
            uuid: Uuid::new_v4(),
            has_participated: true,
        })
        .await
        .unwrap_err();
    assert!(matches!(err.variant, APIErrorVariant::NotFound));
    let err = sdk
        .reminder
        .get_by_registration(Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err.variant, APIErrorVariant::NotFound));
}

#[actix_web::main]
#[test]
async fn test_dispatch_rejects_invalid_limit() {
    let (_, sdk, _) = spawn_app().await;
    let err = sdk.reminder.dispatch(Some(0)).await.unwrap_err();
    assert!(matches!(err.variant, APIErrorVariant::BadClientData));
}

#[actix_web::main]
#[test]
async fn test_reminder_is_dispatched_once_and_feedback_can_be_given() {
    let (app, sdk, _) = spawn_app().await;
    // The reminder is due one day after the event ended
    let registration = insert_registration(&app.ctx, 2 * DAY).await;
    sdk.registration
        .set_participation(SetParticipationInput {
            uuid: registration.uuid,
            has_participated: true,
        })
        .await
        .unwrap();

    let report = sdk.reminder.dispatch(None).await.unwrap();
    assert_eq!(report.claimed, 1);
    assert_eq!(report.dispatched, 1);

    let sent = app.notification_center.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].tokens["participant_uuid"], registration.uuid.to_string());
    assert_eq!(sent[0].locale, "de");
    let stored = app
        .ctx
        .repos
        .registrations
        .find(registration.id)
        .await
        .unwrap();
    assert_eq!(stored.feedback_notification_count, 1);

    // The reminder was finalized, a second pass has nothing to do
    let res = sdk
        .reminder
        .get_by_registration(registration.uuid)
        .await
        .unwrap();
    assert!(res.reminders.is_empty());
    let report = sdk.reminder.dispatch(Some(5)).await.unwrap();
    assert_eq!(report.claimed, 0);
    assert_eq!(app.notification_center.sent().len(), 1);

    // Re-marking after the notification does not schedule another reminder
    let res = sdk
        .registration
        .set_participation(SetParticipationInput {
            uuid: registration.uuid,
            has_participated: true,
        })
        .await
        .unwrap();
    assert!(res.reminders.is_empty());

    let token = token_from_feedback_url(&sent[0].tokens["feedback_url"]);
    let res = sdk
        .feedback
        .submit(SubmitFeedbackInput {
            token: token.clone(),
            answers: json!({ "rating": 4, "comment": "Schöne Tour" }),
        })
        .await
        .expect("To submit feedback");
    assert_eq!(res.feedback.uuid, registration.uuid);
    assert_eq!(res.feedback.event_id, registration.event_id);

    let err = sdk
        .feedback
        .submit(SubmitFeedbackInput {
            token,
            answers: json!({}),
        })
        .await
        .unwrap_err();
    assert!(matches!(err.variant, APIErrorVariant::Conflict));
}

#[actix_web::main]
#[test]
async fn test_forged_feedback_token_is_rejected() {
    let (_, sdk, _) = spawn_app().await;
    let err = sdk
        .feedback
        .submit(SubmitFeedbackInput {
            token: "eyJhbGciOiJIUzI1NiJ9.e30.forged".into(),
            answers: json!({ "rating": 1 }),
        })
        .await
        .unwrap_err();
    assert!(matches!(err.variant, APIErrorVariant::Unauthorized));
}
