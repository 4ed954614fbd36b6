use actix_web::{web, HttpResponse, Responder};
use chrono::NaiveDate;
use std::sync::Arc;

use crate::db::store::AppStore;
use crate::models::availability::{AvailabilityQuery, BulkAvailabilityInput};
use crate::models::calendar::{SyncReport, SyncRequest};
use crate::services::calendar_service::{
    self, blocked_dates_for_events, CalendarFeedParser, CalendarSyncError,
};

pub async fn get_availability(
    data: web::Data<Arc<AppStore>>,
    query: web::Query<AvailabilityQuery>,
) -> impl Responder {
    let store = data.into_inner();
    let entries = store.availability_entries(query.from, query.to).await;
    HttpResponse::Ok().json(entries)
}

/// Admin bulk edit: force a list of dates open or closed in one write.
pub async fn set_availability(
    data: web::Data<Arc<AppStore>>,
    input: web::Json<BulkAvailabilityInput>,
) -> impl Responder {
    let store = data.into_inner();
    let input = input.into_inner();

    let updated = store
        .set_availability_bulk(&input.dates, input.is_available)
        .await;

    println!(
        "Availability updated: {} dates set to {}",
        updated,
        if input.is_available { "open" } else { "closed" }
    );

    HttpResponse::Ok().json(serde_json::json!({ "updated": updated }))
}

/// Pull an external booking-platform calendar and close every date its
/// events cover. Feed text can come inline (`ics`), from a URL in the
/// request, or from the configured `SYNC_FEED_URL`; the server does the
/// fetching because the platforms' exports do not allow browser CORS reads.
pub async fn sync_calendar(
    data: web::Data<Arc<AppStore>>,
    input: web::Json<SyncRequest>,
) -> impl Responder {
    let store = data.into_inner();
    let input = input.into_inner();

    // 1. Obtain the feed text
    let ical_text = if let Some(ics) = input.ics {
        ics
    } else {
        let feed_url = match input.url.or_else(|| std::env::var("SYNC_FEED_URL").ok()) {
            Some(url) => url,
            None => {
                return HttpResponse::BadRequest()
                    .body("No feed supplied and SYNC_FEED_URL is not set");
            }
        };

        match calendar_service::fetch_feed(&feed_url).await {
            Ok(text) => text,
            Err(err) => {
                eprintln!("Calendar feed fetch failed: {}", err);
                return match err {
                    CalendarSyncError::InvalidFeedUrl(_) => {
                        HttpResponse::BadRequest().body(err.to_string())
                    }
                    _ => HttpResponse::InternalServerError().body(err.to_string()),
                };
            }
        }
    };

    // 2. Parse events and expand them into the dates to block
    let events = CalendarFeedParser::parse(&ical_text);
    let (blocked, skipped) = blocked_dates_for_events(&events);
    let blocked_dates: Vec<NaiveDate> = blocked.into_iter().collect();

    // 3. Apply the whole plan as one bulk write. Events only ever close
    // dates; a feed never re-opens anything.
    let dates_blocked = store.set_availability_bulk(&blocked_dates, false).await;

    println!(
        "Calendar sync complete: {} events found, {} skipped, {} dates blocked",
        events.len(),
        skipped,
        dates_blocked
    );

    HttpResponse::Ok().json(SyncReport {
        events_found: events.len(),
        events_skipped: skipped,
        dates_blocked,
        blocked_dates,
    })
}
