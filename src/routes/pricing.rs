use actix_web::{web, HttpResponse, Responder};
use chrono::NaiveDate;
use std::sync::Arc;

use crate::db::store::AppStore;
use crate::models::rates::RateTable;
use crate::models::stay::{EstimateRequest, EstimateResponse};
use crate::services::pricing_service::PricingService;

/// Live estimate for the booking form. Always answers 200: missing or
/// unparseable dates (the guest is still typing) produce `"quote": null`,
/// never an HTTP error the frontend would have to special-case.
pub async fn estimate(
    data: web::Data<Arc<AppStore>>,
    input: web::Json<EstimateRequest>,
) -> impl Responder {
    let store = data.into_inner();
    let input = input.into_inner();

    let check_in = input.check_in.as_deref().and_then(parse_form_date);
    let check_out = input.check_out.as_deref().and_then(parse_form_date);

    let quote = match (check_in, check_out) {
        (Some(check_in), Some(check_out)) => {
            let rates = store.get_rates().await;
            PricingService::calculate(check_in, check_out, input.guests, &rates)
        }
        _ => None,
    };

    HttpResponse::Ok().json(EstimateResponse { quote })
}

pub async fn get_rates(data: web::Data<Arc<AppStore>>) -> impl Responder {
    let store = data.into_inner();
    HttpResponse::Ok().json(store.get_rates().await)
}

/// Replace the whole rate table. Estimates taken after this call price
/// against the new numbers; quotes already snapshotted onto bookings keep
/// the numbers they were taken with.
pub async fn update_rates(
    data: web::Data<Arc<AppStore>>,
    input: web::Json<RateTable>,
) -> impl Responder {
    let store = data.into_inner();
    let rates = input.into_inner();

    println!(
        "Rate table updated: low {}/{}, high {}/{}, tax {}",
        rates.low_season.weekday,
        rates.low_season.weekend,
        rates.high_season.weekday,
        rates.high_season.weekend,
        rates.tourist_tax_per_guest_per_night
    );

    store.update_rates(rates.clone()).await;
    HttpResponse::Ok().json(rates)
}

fn parse_form_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}
