use sac_event_feedback_domain::{EligibilityError, EligibleFeedback, Event};
use sac_event_feedback_infra::FeedbackContext;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    NotEligible(#[from] EligibilityError),
    /// The calendar, the form or the notification could not be looked up
    #[error("Unable to check the feedback configuration: {0}")]
    Unavailable(anyhow::Error),
}

/// Checks that the feedback configuration of the calendar of the `Event`
/// allows sending a feedback reminder right now
pub async fn check_eligibility(
    event: &Event,
    ctx: &FeedbackContext,
) -> Result<EligibleFeedback, CheckError> {
    let calendar = ctx
        .repos
        .calendars
        .find(event.calendar_id)
        .await
        .map_err(CheckError::Unavailable)?
        .ok_or(EligibilityError::CalendarNotFound)?;

    let settings = &calendar.feedback;
    if !settings.enabled {
        return Err(EligibilityError::FeedbackDisabled.into());
    }

    let form_id = match settings.form_id {
        Some(form_id) => form_id,
        None => return Err(EligibilityError::MissingForm.into()),
    };
    let form = ctx
        .repos
        .forms
        .find(form_id)
        .await
        .map_err(CheckError::Unavailable)?;
    if form.is_none() {
        return Err(EligibilityError::MissingForm.into());
    }

    let notification_id = settings
        .notification_id
        .ok_or(EligibilityError::MissingNotification)?;
    let notification = ctx
        .notification_center
        .find_notification(notification_id)
        .await
        .map_err(CheckError::Unavailable)?;
    if notification.is_none() {
        return Err(EligibilityError::MissingNotification.into());
    }

    let profile = settings
        .profile
        .as_deref()
        .and_then(|name| ctx.config.feedback_profiles.get(name))
        .cloned()
        .ok_or(EligibilityError::MissingProfile)?;

    Ok(EligibleFeedback {
        calendar: calendar.clone(),
        form_id,
        notification_id,
        profile,
    })
}
