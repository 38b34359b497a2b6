use super::{
    dispatcher::{dispatch_reminder, DispatchError, DispatchOutcome},
    eligibility::{check_eligibility, CheckError},
    ReminderError,
};
use crate::{
    error::FeedbackError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use sac_event_feedback_api_structs::dispatch_reminders::*;
use sac_event_feedback_domain::Reminder;
use sac_event_feedback_infra::{FeedbackContext, IReminderTransaction};
use serde::Serialize;
use tracing::{error, info, warn};

fn handle_error(_e: ReminderError) -> FeedbackError {
    FeedbackError::InternalError
}

pub async fn dispatch_reminders_controller(
    body: Option<web::Json<RequestBody>>,
    ctx: web::Data<FeedbackContext>,
) -> Result<HttpResponse, FeedbackError> {
    let limit = body.and_then(|body| body.limit);
    if let Some(limit) = limit {
        if limit < 1 {
            return Err(FeedbackError::BadClientData(format!(
                "Invalid limit: {}, must be a positive number",
                limit
            )));
        }
    }

    let usecase = RunSchedulingPassUseCase { limit };
    execute(usecase, &ctx)
        .await
        .map(|report| {
            HttpResponse::Ok().json(APIResponse {
                purged: report.purged,
                claimed: report.claimed,
                dispatched: report.dispatched,
                undelivered: report.undelivered,
                skipped: report.skipped,
                released: report.released,
            })
        })
        .map_err(handle_error)
}

/// One pass of the reminder scheduler.
///
/// Due reminders are claimed inside a transaction that also purges expired
/// and abandoned reminders. The claim is committed before the notification
/// center is called, and every claimed reminder is deleted once it has
/// been handled.
#[derive(Debug)]
pub struct RunSchedulingPassUseCase {
    /// Maximum number of reminders to claim, defaults to the configured
    /// batch limit
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchedulingPassReport {
    /// Expired and abandoned reminders that were deleted
    pub purged: u64,
    pub claimed: usize,
    pub dispatched: usize,
    /// Reminders the notification center did not accept
    pub undelivered: usize,
    /// Reminders that were dropped without calling the notification center
    pub skipped: usize,
    /// Claimed reminders put back to pending because the grace window did
    /// not leave room to dispatch them
    pub released: usize,
}

#[derive(Debug, PartialEq)]
enum PassOutcome {
    Dispatched,
    Undelivered,
    Skipped,
}

#[async_trait::async_trait(?Send)]
impl UseCase for RunSchedulingPassUseCase {
    type Response = SchedulingPassReport;

    type Error = ReminderError;

    const NAME: &'static str = "RunSchedulingPass";

    async fn execute(&mut self, ctx: &FeedbackContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp();
        let limit = self.limit.unwrap_or(ctx.config.reminder_batch_limit);
        let grace_cutoff = now - ctx.config.reminder_dispatch_grace_secs;
        // Claimed reminders are purged by other passes once the grace window
        // is over, so no reminder is started that might not finish within it
        let lease_end = now + ctx.config.reminder_dispatch_grace_secs;
        let round_trip = 2 * ctx.config.notification_timeout_secs as i64;

        let (purged, claimed) = claim_due_reminders(now, grace_cutoff, limit, ctx)
            .await
            .map_err(|e| {
                error!("Unable to claim due reminders. Error: {:?}", e);
                ReminderError::TransactionFailure(e.to_string())
            })?;

        let mut report = SchedulingPassReport {
            purged,
            claimed: claimed.len(),
            ..Default::default()
        };

        for (i, reminder) in claimed.iter().enumerate() {
            if ctx.sys.get_timestamp() + round_trip >= lease_end {
                warn!(
                    "Grace window of the scheduling pass is running out, releasing {} reminder(s)",
                    claimed.len() - i
                );
                report.released = release_unprocessed(&claimed[i..], ctx).await;
                break;
            }
            let outcome = match process_reminder(reminder, ctx).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("Scheduling pass aborted: {}", e);
                    release_unprocessed(&claimed[i..], ctx).await;
                    return Err(e);
                }
            };
            match outcome {
                PassOutcome::Dispatched => report.dispatched += 1,
                PassOutcome::Undelivered => report.undelivered += 1,
                PassOutcome::Skipped => report.skipped += 1,
            }

            match ctx.repos.reminders.delete(reminder.id).await {
                Ok(_) => (),
                Err(e) => error!(
                    "Unable to delete dispatched reminder: {}. It is purged by a later pass. Error: {:?}",
                    reminder.id, e
                ),
            }
        }

        if report.claimed > 0 || report.purged > 0 {
            info!("Scheduling pass finished: {:?}", report);
        }
        Ok(report)
    }
}

async fn claim(
    tx: &mut dyn IReminderTransaction,
    now: i64,
    grace_cutoff: i64,
    limit: i64,
) -> anyhow::Result<(u64, Vec<Reminder>)> {
    let purged = tx.purge_stale(now, grace_cutoff).await?;
    let mut due = tx.lock_due_for_dispatch(now, limit).await?;
    for reminder in due.iter_mut() {
        tx.mark_dispatched(reminder.id, now).await?;
        reminder.mark_dispatched(now);
    }
    Ok((purged, due))
}

async fn claim_due_reminders(
    now: i64,
    grace_cutoff: i64,
    limit: i64,
    ctx: &FeedbackContext,
) -> anyhow::Result<(u64, Vec<Reminder>)> {
    let mut tx = ctx.repos.reminders.begin().await?;
    match claim(&mut *tx, now, grace_cutoff, limit).await {
        Ok(claimed) => {
            tx.commit().await?;
            Ok(claimed)
        }
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                error!("Unable to roll back the claim. Error: {:?}", rollback_err);
            }
            Err(e)
        }
    }
}

/// Puts reminders that were claimed but not handled back into the pending
/// state so that the next pass picks them up. Returns how many were released.
async fn release_unprocessed(reminders: &[Reminder], ctx: &FeedbackContext) -> usize {
    let reminder_ids = reminders.iter().map(|r| r.id).collect::<Vec<_>>();
    match ctx.repos.reminders.release(&reminder_ids).await {
        Ok(released) if released as usize == reminder_ids.len() => {
            warn!("Released {} reminder(s): {:?}", released, reminder_ids);
            released as usize
        }
        Ok(released) => {
            error!(
                "Only {} of the claimed reminders {:?} could be released, the others were purged by another pass without being dispatched",
                released, reminder_ids
            );
            released as usize
        }
        Err(e) => {
            error!(
                "Unable to release reminders: {:?}. They are purged after the grace window. Error: {:?}",
                reminder_ids, e
            );
            0
        }
    }
}

async fn process_reminder(
    reminder: &Reminder,
    ctx: &FeedbackContext,
) -> Result<PassOutcome, ReminderError> {
    let registration = match ctx.repos.registrations.find_by_uuid(&reminder.uuid).await {
        Ok(Some(registration)) => registration,
        Ok(None) => {
            warn!(
                "Registration {} of reminder {} not found, dropping the reminder",
                reminder.uuid, reminder.id
            );
            return Ok(PassOutcome::Skipped);
        }
        Err(e) => return Err(ReminderError::TransactionFailure(e.to_string())),
    };

    let event = match ctx.repos.events.find(registration.event_id).await {
        Ok(Some(event)) => event,
        Ok(None) => {
            warn!(
                "Event {} of reminder {} not found, dropping the reminder",
                registration.event_id, reminder.id
            );
            return Ok(PassOutcome::Skipped);
        }
        Err(e) => return Err(ReminderError::TransactionFailure(e.to_string())),
    };

    let feedback = match check_eligibility(&event, ctx).await {
        Ok(feedback) => feedback,
        Err(CheckError::NotEligible(e)) => {
            let e = ReminderError::MisconfiguredFeedback(e);
            error!(
                "Dropping reminder {} of event {}: {}",
                reminder.id, event.id, e
            );
            return Ok(PassOutcome::Skipped);
        }
        Err(CheckError::Unavailable(e)) => {
            return Err(ReminderError::TransactionFailure(e.to_string()))
        }
    };

    match dispatch_reminder(reminder, &registration, &event, &feedback, ctx).await {
        Ok(DispatchOutcome::Delivered(_)) => Ok(PassOutcome::Dispatched),
        Ok(DispatchOutcome::Undelivered) => {
            warn!(
                "Dropping reminder {} of registration {}: {}",
                reminder.id,
                registration.uuid,
                ReminderError::TransientDispatchFailure
            );
            Ok(PassOutcome::Undelivered)
        }
        Err(DispatchError::Token(e)) => {
            error!(
                "Dropping reminder {}, unable to create the feedback link: {:?}",
                reminder.id, e
            );
            Ok(PassOutcome::Skipped)
        }
        Err(DispatchError::Transport(e)) => Err(ReminderError::TransactionFailure(e.to_string())),
    }
}
