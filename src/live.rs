//! Time windows for "live" announcements.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use tracing::warn;

use crate::model::CvEntry;

/// An activation flag with an optional date window. The end date is inclusive
/// through the whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LiveWindow {
    pub is_active: bool,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDate>,
}

impl LiveWindow {
    pub fn new(is_active: bool, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            is_active,
            start: start.map(|date| date.and_time(chrono::NaiveTime::MIN)),
            end,
        }
    }

    /// Build the window of a CV entry. When both bounds are filled in but one
    /// can't be read as a date, the window is never active.
    pub fn for_entry(entry: &CvEntry) -> Self {
        let start = entry.live_start_date.as_deref().filter(|s| !s.trim().is_empty());
        let end = entry.live_end_date.as_deref().filter(|s| !s.trim().is_empty());

        let (Some(start), Some(end)) = (start, end) else {
            return Self {
                is_active: entry.is_live,
                start: None,
                end: None,
            };
        };

        match (parse_start(start), parse_end(end)) {
            (Some(start), Some(end)) => Self {
                is_active: entry.is_live,
                start: Some(start),
                end: Some(end),
            },
            _ => {
                warn!(title = %entry.title, start, end, "unreadable live window dates");
                Self::default()
            }
        }
    }

    /// Whether the window is live at `now`.
    ///
    /// An inactive flag always loses. A flag without a complete window is
    /// always live. Otherwise `start <= now <= end 23:59:59.999`.
    pub fn is_active(&self, now: NaiveDateTime) -> bool {
        if !self.is_active {
            return false;
        }

        let (Some(start), Some(end)) = (self.start, self.end) else {
            return true;
        };

        let Some(end) = end.and_hms_milli_opt(23, 59, 59, 999) else {
            return false;
        };

        start <= now && now <= end
    }
}

/// Local wall-clock time, the instant live windows are evaluated against.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn parse_start(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_time(chrono::NaiveTime::MIN));
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Local).naive_local())
}

fn parse_end(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Local).date_naive())
}
