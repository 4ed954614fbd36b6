use std::collections::BTreeSet;

use chrono::NaiveDate;
use url::Url;

use crate::models::calendar::{CalendarEvent, IcalDate};

const FEED_FETCH_TIMEOUT_SECS: u64 = 20;

#[derive(Debug)]
pub enum CalendarSyncError {
    InvalidFeedUrl(String),
    HttpError(reqwest::Error),
    FeedUnavailable(String),
}

impl std::fmt::Display for CalendarSyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalendarSyncError::InvalidFeedUrl(msg) => write!(f, "Invalid feed URL: {}", msg),
            CalendarSyncError::HttpError(err) => write!(f, "HTTP error: {}", err),
            CalendarSyncError::FeedUnavailable(msg) => write!(f, "Feed unavailable: {}", msg),
        }
    }
}

impl std::error::Error for CalendarSyncError {}

impl From<reqwest::Error> for CalendarSyncError {
    fn from(err: reqwest::Error) -> Self {
        CalendarSyncError::HttpError(err)
    }
}

/// Minimal line-oriented VEVENT reader for the calendar exports the booking
/// platforms hand out. Deliberately a small subset of RFC 5545: no folded
/// continuation lines, no RRULE expansion, no text unescaping. The feeds we
/// ingest are flat lists of reserved-date blocks and nothing in the sync
/// pipeline expects more than that.
pub struct CalendarFeedParser;

#[derive(Default)]
struct EventDraft {
    uid: Option<String>,
    summary: Option<String>,
    dtstart: Option<String>,
    dtend: Option<String>,
}

impl CalendarFeedParser {
    /// Extract every complete VEVENT from raw feed text. Malformed input is
    /// never an error: blocks missing DTSTART or DTEND are dropped, unknown
    /// lines are ignored, and an empty calendar simply yields no events.
    pub fn parse(ical_text: &str) -> Vec<CalendarEvent> {
        let mut events = Vec::new();
        let mut in_event = false;
        let mut draft = EventDraft::default();

        for raw_line in ical_text.lines() {
            let line = raw_line.trim();

            if line == "BEGIN:VEVENT" {
                in_event = true;
                draft = EventDraft::default();
            } else if line == "END:VEVENT" {
                if in_event {
                    // Both bounds or the event never happened
                    if let (Some(dtstart), Some(dtend)) = (draft.dtstart.take(), draft.dtend.take())
                    {
                        events.push(CalendarEvent {
                            uid: draft.uid.take(),
                            summary: draft.summary.take(),
                            dtstart,
                            dtend,
                        });
                    }
                    in_event = false;
                }
            } else if in_event {
                if let Some(rest) = line.strip_prefix("SUMMARY:") {
                    draft.summary = Some(rest.to_string());
                } else if line.starts_with("DTSTART") {
                    // DTSTART may carry parameters (DTSTART;VALUE=DATE:...),
                    // so the value is whatever follows the last colon
                    draft.dtstart = Some(Self::value_after_last_colon(line));
                } else if line.starts_with("DTEND") {
                    draft.dtend = Some(Self::value_after_last_colon(line));
                } else if let Some(rest) = line.strip_prefix("UID:") {
                    draft.uid = Some(rest.to_string());
                }
            }
        }

        events
    }

    fn value_after_last_colon(line: &str) -> String {
        match line.rsplit_once(':') {
            Some((_, value)) => value.to_string(),
            None => line.to_string(),
        }
    }
}

/// Normalize a raw iCal date token. `20240701` and `20240701T120000Z` both
/// come back as the calendar date 2024-07-01; any other shape is preserved
/// as `Unparsed` instead of being compared as a date downstream.
pub fn normalize_ical_date(raw: &str) -> IcalDate {
    let token = match raw.split_once('T') {
        Some((date_part, _)) => date_part,
        None => raw,
    };

    let re = regex::Regex::new(r"^\d{8}$");
    if re.unwrap().is_match(token) {
        if let Ok(date) = NaiveDate::parse_from_str(token, "%Y%m%d") {
            return IcalDate::Parsed(date);
        }
    }

    IcalDate::Unparsed(raw.to_string())
}

/// Every calendar date from `start` to `end`, inclusive on both ends.
///
/// `start == end` yields exactly `[start]`: single all-day blocks arrive
/// with equal bounds and must stay one day. We intentionally do not apply
/// the iCal exclusive-DTEND minus-one-day adjustment anywhere, so the
/// inclusive walk is the whole contract.
pub fn dates_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if start == end {
        return vec![start];
    }

    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        dates.push(current);
        // A range ending on NaiveDate::MAX has no successor to step to
        current = match current.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    dates
}

/// Turn parsed events into the set of dates a sync run should block.
/// Events whose bounds fail to normalize are counted and skipped; duplicate
/// dates across events collapse (unavailable wins, nothing to reconcile).
pub fn blocked_dates_for_events(events: &[CalendarEvent]) -> (BTreeSet<NaiveDate>, usize) {
    let mut blocked = BTreeSet::new();
    let mut skipped = 0;

    for event in events {
        let start = normalize_ical_date(&event.dtstart);
        let end = normalize_ical_date(&event.dtend);

        match (start.as_date(), end.as_date()) {
            (Some(start), Some(end)) => {
                for date in dates_in_range(start, end) {
                    blocked.insert(date);
                }
            }
            _ => {
                eprintln!(
                    "Skipping event with unrecognized date tokens: uid={:?} dtstart={:?} dtend={:?}",
                    event.uid, event.dtstart, event.dtend
                );
                skipped += 1;
            }
        }
    }

    (blocked, skipped)
}

/// Server-side feed download. The browser cannot pull the booking-platform
/// export itself (CORS), so the API fetches it and hands the text to the
/// parser. Any network-level timeout lives here, not in the parser.
pub async fn fetch_feed(feed_url: &str) -> Result<String, CalendarSyncError> {
    let parsed = Url::parse(feed_url)
        .map_err(|e| CalendarSyncError::InvalidFeedUrl(format!("{}: {}", feed_url, e)))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(CalendarSyncError::InvalidFeedUrl(format!(
            "unsupported scheme '{}'",
            parsed.scheme()
        )));
    }

    println!("Fetching calendar feed from {}", feed_url);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(FEED_FETCH_TIMEOUT_SECS))
        .build()?;

    let response = client.get(parsed).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(CalendarSyncError::FeedUnavailable(format!(
            "feed responded with status {}",
            status
        )));
    }

    Ok(response.text().await?)
}
