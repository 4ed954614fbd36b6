use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One `BEGIN:VEVENT .. END:VEVENT` block pulled out of an external
/// booking-platform feed. Date tokens are kept raw here; normalization
/// happens in a second step so that an odd token can be skipped instead of
/// taking the whole sync down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub uid: Option<String>,
    pub summary: Option<String>,
    pub dtstart: String,
    pub dtend: String,
}

/// Outcome of normalizing a raw iCal date token. Tokens the feed hands us
/// in a shape we do not recognize are carried along as `Unparsed` so the
/// caller has to decide what to do with them, rather than comparing a
/// garbage string as if it were a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IcalDate {
    Parsed(NaiveDate),
    Unparsed(String),
}

impl IcalDate {
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            IcalDate::Parsed(date) => Some(*date),
            IcalDate::Unparsed(_) => None,
        }
    }
}

impl fmt::Display for IcalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IcalDate::Parsed(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            IcalDate::Unparsed(raw) => write!(f, "{}", raw),
        }
    }
}

/// Body of `POST /api/calendar/sync`. Either inline feed text or a URL to
/// fetch server-side; with neither present the configured `SYNC_FEED_URL`
/// is used.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncRequest {
    pub url: Option<String>,
    pub ics: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncReport {
    pub events_found: usize,
    pub events_skipped: usize,
    pub dates_blocked: usize,
    pub blocked_dates: Vec<NaiveDate>,
}
