use sac_event_feedback_utils::{days_to_secs, SECONDS_PER_DAY};
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;
use url::Url;

fn default_locale() -> String {
    "de".into()
}

/// Settings that decide when and how participants of an `Event` are asked
/// for feedback. A `Calendar` refers to a profile by name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeedbackProfile {
    /// Days after the end of the event at which the reminder is sent
    pub send_reminder_after_days: i64,
    /// Days after the end of the event at which an unsent reminder and
    /// the feedback link expire
    pub reminder_expiration_days: i64,
    /// Seconds added on top of the nominal execution date
    #[serde(default)]
    pub send_reminder_execution_delay: i64,
    /// Page hosting the feedback form
    pub feedback_page_url: Url,
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl FeedbackProfile {
    pub fn execution_date(&self, event_end: i64) -> i64 {
        event_end.saturating_add(
            days_to_secs(self.send_reminder_after_days) + self.send_reminder_execution_delay,
        )
    }

    pub fn expiration(&self, event_end: i64) -> i64 {
        event_end.saturating_add(days_to_secs(self.reminder_expiration_days))
    }

    /// Seconds from the end of the event to the execution date, `None` on
    /// overflow
    fn checked_execution_offset(&self) -> Option<i64> {
        self.send_reminder_after_days
            .checked_mul(SECONDS_PER_DAY)?
            .checked_add(self.send_reminder_execution_delay)
    }

    /// Deep link to the feedback form carrying the signed feedback token
    pub fn feedback_url(&self, token: &str) -> Url {
        let mut url = self.feedback_page_url.clone();
        url.query_pairs_mut().append_pair("token", token);
        url
    }

    fn validate(&self) -> Result<(), String> {
        if self.send_reminder_after_days < 0 {
            return Err("send_reminder_after_days must not be negative".into());
        }
        if self.reminder_expiration_days <= self.send_reminder_after_days {
            return Err(
                "reminder_expiration_days must be greater than send_reminder_after_days".into(),
            );
        }
        if self.send_reminder_execution_delay < 0 {
            return Err("send_reminder_execution_delay must not be negative".into());
        }
        let execution_offset = self
            .checked_execution_offset()
            .ok_or("send_reminder_after_days and send_reminder_execution_delay are out of range")?;
        let expiration_offset = self
            .reminder_expiration_days
            .checked_mul(SECONDS_PER_DAY)
            .ok_or("reminder_expiration_days is out of range")?;
        if execution_offset >= expiration_offset {
            return Err("the execution delay pushes the reminder past its expiration".into());
        }
        if self.feedback_page_url.cannot_be_a_base() {
            return Err("feedback_page_url must be an absolute url".into());
        }
        if self.locale.trim().is_empty() {
            return Err("locale must not be empty".into());
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("Feedback profiles could not be parsed: {0}")]
    Malformed(String),
    #[error("Feedback profile `{profile}` is invalid: {reason}")]
    Invalid { profile: String, reason: String },
}

/// All configured `FeedbackProfile`s by name. Every profile has been
/// validated on construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackProfiles {
    profiles: HashMap<String, FeedbackProfile>,
}

impl FeedbackProfiles {
    pub fn new(profiles: HashMap<String, FeedbackProfile>) -> Result<Self, ProfileError> {
        for (name, profile) in &profiles {
            if name.trim().is_empty() {
                return Err(ProfileError::Invalid {
                    profile: name.clone(),
                    reason: "profile name must not be empty".into(),
                });
            }
            profile.validate().map_err(|reason| ProfileError::Invalid {
                profile: name.clone(),
                reason,
            })?;
        }
        Ok(Self { profiles })
    }

    /// Parses profiles from a json object keyed by profile name
    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        let profiles: HashMap<String, FeedbackProfile> =
            serde_json::from_str(json).map_err(|e| ProfileError::Malformed(e.to_string()))?;
        Self::new(profiles)
    }

    pub fn get(&self, name: &str) -> Option<&FeedbackProfile> {
        self.profiles.get(name)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
