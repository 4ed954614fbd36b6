use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;
use std::env;
use std::sync::Arc;
use url::Url;

use crate::db::store::AppStore;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(data: web::Data<Arc<AppStore>>) -> impl Responder {
    let store = data.into_inner();

    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    // Check the application store
    let store_result = check_store(&store).await;
    health
        .services
        .insert("store".to_string(), store_result.clone());

    // Check calendar sync configuration
    let sync_result = check_sync_feed();
    health
        .services
        .insert("calendar_sync".to_string(), sync_result.clone());

    // Determine overall status (if any service is not ok, the overall status is degraded)
    if store_result.status != "ok" || sync_result.status != "ok" {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

async fn check_store(store: &Arc<AppStore>) -> ServiceStatus {
    let bookings = store.booking_count().await;
    let blocked_dates = store.blocked_date_count().await;

    ServiceStatus {
        status: "ok".to_string(),
        details: Some(format!(
            "{} bookings, {} blocked dates",
            bookings, blocked_dates
        )),
    }
}

fn check_sync_feed() -> ServiceStatus {
    // The feed URL is optional: without it, syncs still work with an
    // explicit url or inline ics in the request body. A configured URL
    // that the fetcher would reject is a misconfiguration worth surfacing.
    match env::var("SYNC_FEED_URL") {
        Ok(url) => match Url::parse(&url) {
            Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {
                ServiceStatus {
                    status: "ok".to_string(),
                    details: Some(format!("Default feed configured: {}", url)),
                }
            }
            Ok(parsed) => ServiceStatus {
                status: "error".to_string(),
                details: Some(format!(
                    "SYNC_FEED_URL has unsupported scheme '{}'",
                    parsed.scheme()
                )),
            },
            Err(e) => ServiceStatus {
                status: "error".to_string(),
                details: Some(format!("SYNC_FEED_URL is not a valid URL: {}", e)),
            },
        },
        Err(_) => ServiceStatus {
            status: "ok".to_string(),
            details: Some("SYNC_FEED_URL not set; sync requests must supply a feed".to_string()),
        },
    }
}
