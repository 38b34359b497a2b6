use chrono::Utc;
use sac_event_feedback_utils::millis_to_secs;

// Mocking out time so that it is possible to run tests that depend on time.
pub trait ISys: Send + Sync {
    /// The current timestamp in millis
    fn get_timestamp_millis(&self) -> i64;

    /// The current timestamp in epoch seconds
    fn get_timestamp(&self) -> i64 {
        millis_to_secs(self.get_timestamp_millis())
    }
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// System with a fixed time, used in tests
pub struct StaticTimeSys {
    pub timestamp: i64,
}

impl ISys for StaticTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.timestamp * 1000
    }
}
