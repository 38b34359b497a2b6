use sac_event_feedback_domain::FeedbackProfiles;
use sac_event_feedback_utils::create_random_secret;
use std::convert::TryFrom;
use std::str::FromStr;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Secret used to sign the feedback tokens embedded in reminder links
    pub token_secret: String,
    /// Issuer claim of the feedback tokens
    pub token_issuer: String,
    /// Value of the `admin_email` notification token
    pub admin_email: String,
    /// Base url of the notification center
    pub notification_center_url: String,
    /// Maximum number of reminders a single scheduling pass selects.
    /// This caps how long rows stay locked and how big a transaction gets.
    pub reminder_batch_limit: i64,
    /// Seconds a dispatched reminder may linger before a later pass
    /// considers it abandoned and purges it
    pub reminder_dispatch_grace_secs: i64,
    /// Interval in seconds of the in-process send reminders job
    pub reminder_job_interval_secs: u64,
    /// Timeout in seconds of a single request to the notification center.
    /// Handling one reminder takes at most two requests, which must fit in
    /// the grace window.
    pub notification_timeout_secs: u64,
    pub feedback_profiles: FeedbackProfiles,
}

const DEFAULT_BATCH_LIMIT: i64 = 20;
const DEFAULT_DISPATCH_GRACE_SECS: i64 = 60;
const DEFAULT_NOTIFICATION_TIMEOUT_SECS: u64 = 5;

fn parse_env_or<T: FromStr + ToString>(key: &str, default: T) -> T {
    parse_env_where(key, default, |_| true)
}

fn parse_env_where<T: FromStr + ToString, F: Fn(&T) -> bool>(
    key: &str,
    default: T,
    is_valid: F,
) -> T {
    match std::env::var(key) {
        Ok(value) => match value.parse::<T>() {
            Ok(parsed) if is_valid(&parsed) => parsed,
            _ => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    key,
                    value,
                    default.to_string()
                );
                default
            }
        },
        Err(_) => default,
    }
}

fn load_feedback_profiles() -> FeedbackProfiles {
    const PROFILES_PATH: &str = "FEEDBACK_PROFILES_PATH";

    let path = match std::env::var(PROFILES_PATH) {
        Ok(path) => path,
        Err(_) => {
            warn!(
                "Did not find {} environment variable. No event will be eligible for feedback reminders.",
                PROFILES_PATH
            );
            return FeedbackProfiles::default();
        }
    };
    let json = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Unable to read feedback profiles at {}: {}", path, e));
    let profiles = FeedbackProfiles::from_json(&json)
        .unwrap_or_else(|e| panic!("Invalid feedback profiles at {}: {}", path, e));
    info!("Loaded {} feedback profile(s) from {}", profiles.len(), path);
    profiles
}

/// Two notification center requests must fit in the grace window, otherwise
/// a later pass could purge a reminder that is still being dispatched
fn fits_dispatch_window(grace_secs: i64, timeout_secs: u64) -> bool {
    i64::try_from(timeout_secs).map_or(false, |timeout| timeout.saturating_mul(2) < grace_secs)
}

fn dispatch_window(grace_secs: i64, timeout_secs: u64) -> (i64, u64) {
    if fits_dispatch_window(grace_secs, timeout_secs) {
        return (grace_secs, timeout_secs);
    }
    warn!(
        "REMINDER_DISPATCH_GRACE_SECS: {} must be more than twice NOTIFICATION_CENTER_TIMEOUT_SECS: {}, falling back to the defaults: {} and {}.",
        grace_secs, timeout_secs, DEFAULT_DISPATCH_GRACE_SECS, DEFAULT_NOTIFICATION_TIMEOUT_SECS
    );
    (DEFAULT_DISPATCH_GRACE_SECS, DEFAULT_NOTIFICATION_TIMEOUT_SECS)
}

impl Config {
    pub fn new() -> Self {
        let token_secret = match std::env::var("FEEDBACK_TOKEN_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                info!("Did not find FEEDBACK_TOKEN_SECRET environment variable. Going to create one.");
                info!("Feedback links will stop working when the application restarts.");
                create_random_secret(32)
            }
        };

        let (reminder_dispatch_grace_secs, notification_timeout_secs) = dispatch_window(
            parse_env_where(
                "REMINDER_DISPATCH_GRACE_SECS",
                DEFAULT_DISPATCH_GRACE_SECS,
                |g| *g > 0,
            ),
            parse_env_where(
                "NOTIFICATION_CENTER_TIMEOUT_SECS",
                DEFAULT_NOTIFICATION_TIMEOUT_SECS,
                |t| *t > 0,
            ),
        );

        Self {
            port: parse_env_or("PORT", 5000),
            token_secret,
            token_issuer: std::env::var("FEEDBACK_TOKEN_ISSUER").unwrap_or_else(|_| "localhost".into()),
            admin_email: std::env::var("ADMIN_EMAIL").unwrap_or_default(),
            notification_center_url: std::env::var("NOTIFICATION_CENTER_URL")
                .unwrap_or_else(|_| "http://localhost:8080".into()),
            reminder_batch_limit: parse_env_where("REMINDER_BATCH_LIMIT", DEFAULT_BATCH_LIMIT, |l| {
                *l > 0
            }),
            reminder_dispatch_grace_secs,
            reminder_job_interval_secs: parse_env_or("REMINDER_JOB_INTERVAL_SECS", 60),
            notification_timeout_secs,
            feedback_profiles: load_feedback_profiles(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
