use {
    chrono::{DateTime, Local, Utc},
    chrono_tz::Tz,
    serde::{Deserialize, Serialize},
};

use crate::extract::{extract_project, extract_tags};

/// One display-ready check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkin {
    /// Author display name.
    pub user: String,
    /// UTC calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Wall-clock time in the display zone, `hh:mm AM`.
    pub timestamp: String,
    pub message: String,
    pub project: String,
    pub tags: Vec<String>,
}

impl Checkin {
    /// Build a check-in, deriving date, clock time, project and tags.
    ///
    /// `zone` of `None` renders the clock time in the host's local zone.
    #[must_use]
    pub fn new(user: impl Into<String>, sent_at: DateTime<Utc>, message: String, zone: Option<Tz>) -> Self {
        Self {
            user: user.into(),
            date: calendar_date(sent_at),
            timestamp: clock_time(sent_at, zone),
            project: extract_project(&message),
            tags: extract_tags(&message),
            message,
        }
    }
}

/// A channel member shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
}

/// `YYYY-MM-DD` of the instant in UTC.
#[must_use]
pub fn calendar_date(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// Two-digit 12-hour clock with meridiem, e.g. `09:05 AM`.
#[must_use]
pub fn clock_time(at: DateTime<Utc>, zone: Option<Tz>) -> String {
    const FORMAT: &str = "%I:%M %p";
    match zone {
        Some(tz) => at.with_timezone(&tz).format(FORMAT).to_string(),
        None => at.with_timezone(&Local).format(FORMAT).to_string(),
    }
}
