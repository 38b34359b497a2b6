use crate::{shared::entity::Entity, FeedbackProfile};
use uuid::Uuid;

/// A `Reminder` is a one-shot obligation to ask the participant of an
/// event `Registration` for feedback.
///
/// A reminder is never sent twice. Once it has been handed to the
/// notification center it is marked as dispatched and deleted right after.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: i64,
    /// The uuid of the `Registration` this `Reminder` is associated with
    pub uuid: Uuid,
    /// Creation timestamp in epoch seconds
    pub date_added: i64,
    /// Earliest timestamp (epoch seconds) at which the `Reminder` may be sent
    pub execution_date: i64,
    /// Timestamp (epoch seconds) after which the `Reminder` is void and
    /// must be purged without being sent
    pub expiration: i64,
    pub dispatched: bool,
    /// Timestamp (epoch seconds) at which `dispatched` was set
    pub dispatch_time: Option<i64>,
}

impl Entity<i64> for Reminder {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Reminder {
    pub fn is_expired(&self, now: i64) -> bool {
        self.expiration < now
    }

    /// Whether the `Reminder` can be selected for dispatch at `now`
    pub fn is_due(&self, now: i64) -> bool {
        !self.dispatched && self.expiration > now && self.execution_date <= now
    }

    /// A dispatched `Reminder` that is still around after the grace window
    /// belongs to a pass that never finished its cleanup
    pub fn is_stale(&self, grace_cutoff: i64) -> bool {
        matches!(self.dispatch_time, Some(dispatch_time) if dispatch_time < grace_cutoff)
    }

    pub fn should_purge(&self, now: i64, grace_cutoff: i64) -> bool {
        self.is_expired(now) || self.is_stale(grace_cutoff)
    }

    pub fn mark_dispatched(&mut self, dispatch_time: i64) {
        debug_assert!(dispatch_time > 0);
        self.dispatched = true;
        self.dispatch_time = Some(dispatch_time);
    }

    pub fn release(&mut self) {
        self.dispatched = false;
        self.dispatch_time = None;
    }
}

/// A `Reminder` that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewReminder {
    pub uuid: Uuid,
    pub date_added: i64,
    pub execution_date: i64,
    pub expiration: i64,
}

impl NewReminder {
    /// Schedules the feedback reminder for a registration of an event that
    /// ended at `event_end`. Returns `None` when the feedback window of
    /// the profile is already over.
    pub fn for_event(
        uuid: Uuid,
        event_end: i64,
        profile: &FeedbackProfile,
        now: i64,
    ) -> Option<Self> {
        let expiration = profile.expiration(event_end);
        if expiration <= now {
            return None;
        }

        Some(Self {
            uuid,
            date_added: now,
            execution_date: profile.execution_date(event_end),
            expiration,
        })
    }

    pub fn into_reminder(self, id: i64) -> Reminder {
        Reminder {
            id,
            uuid: self.uuid,
            date_added: self.date_added,
            execution_date: self.execution_date,
            expiration: self.expiration,
            dispatched: false,
            dispatch_time: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reminder(execution_date: i64, expiration: i64) -> Reminder {
        NewReminder {
            uuid: Uuid::new_v4(),
            date_added: 0,
            execution_date,
            expiration,
        }
        .into_reminder(1)
    }

    fn profile() -> FeedbackProfile {
        FeedbackProfile {
            send_reminder_after_days: 1,
            reminder_expiration_days: 14,
            send_reminder_execution_delay: 300,
            feedback_page_url: "https://sac.example.org/feedback".parse().unwrap(),
            locale: "de".into(),
        }
    }

    #[test]
    fn due_reminders() {
        let now = 1_000_000;
        assert!(reminder(now - 10, now + 3600).is_due(now));
        assert!(reminder(now, now + 1).is_due(now));
        assert!(!reminder(now + 1, now + 3600).is_due(now));
        // Expiring exactly now is neither due nor expired
        assert!(!reminder(now - 10, now).is_due(now));
        assert!(!reminder(now - 10, now).is_expired(now));
        assert!(reminder(now - 10, now - 1).is_expired(now));

        let mut dispatched = reminder(now - 10, now + 3600);
        dispatched.mark_dispatched(now);
        assert!(!dispatched.is_due(now));
    }

    #[test]
    fn stale_reminders() {
        let now = 1_000_000;
        let mut r = reminder(now - 10, now + 3600);
        assert!(!r.is_stale(now - 60));

        r.mark_dispatched(now - 61);
        assert!(r.dispatched);
        assert!(r.is_stale(now - 60));
        assert!(r.should_purge(now, now - 60));

        r.release();
        assert!(!r.dispatched);
        assert_eq!(r.dispatch_time, None);
        assert!(!r.should_purge(now, now - 60));
    }

    #[test]
    fn schedules_reminder_for_event() {
        let event_end = 1_600_000_000;
        let uuid = Uuid::new_v4();
        let r = NewReminder::for_event(uuid, event_end, &profile(), event_end + 10).unwrap();
        assert_eq!(r.uuid, uuid);
        assert_eq!(r.date_added, event_end + 10);
        assert_eq!(r.execution_date, event_end + 86_400 + 300);
        assert_eq!(r.expiration, event_end + 14 * 86_400);

        // Feedback window is over
        assert!(NewReminder::for_event(uuid, event_end, &profile(), event_end + 14 * 86_400).is_none());
    }
}
