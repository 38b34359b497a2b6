use crate::shared::entity::Entity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instructor {
    pub name: String,
    pub email: String,
}

/// An event of the club that members register for
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: i64,
    /// The `Calendar` holding the feedback settings for this `Event`
    pub calendar_id: i64,
    pub title: String,
    /// Timestamp (epoch seconds) of the end of the last event day
    pub end_date: i64,
    pub main_instructor: Option<Instructor>,
}

impl Entity<i64> for Event {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Event {
    pub fn instructor_name(&self) -> &str {
        self.main_instructor
            .as_ref()
            .map(|i| i.name.as_str())
            .unwrap_or_default()
    }

    pub fn instructor_email(&self) -> &str {
        self.main_instructor
            .as_ref()
            .map(|i| i.email.as_str())
            .unwrap_or_default()
    }
}
