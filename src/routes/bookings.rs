use actix_web::{web, HttpResponse, Responder};
use chrono::{Duration, Utc};
use rand::{distributions::Alphanumeric, Rng};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::store::AppStore;
use crate::models::booking::{Booking, BookingInput, BookingStatus};
use crate::services::calendar_service::dates_in_range;
use crate::services::pricing_service::PricingService;

pub async fn create_booking(
    data: web::Data<Arc<AppStore>>,
    input: web::Json<BookingInput>,
) -> impl Responder {
    let store = data.into_inner();
    let input = input.into_inner();

    if !is_valid_email(&input.email) {
        return HttpResponse::BadRequest().body("Invalid email address");
    }

    if input.guests < 1 {
        return HttpResponse::BadRequest().body("At least one guest is required");
    }

    if input.check_in >= input.check_out {
        return HttpResponse::BadRequest().body("Check-out must be after check-in");
    }

    // 1. Every night of the stay must be open. The stay consumes the nights
    //    up to but not including check-out day, so a back-to-back booking
    //    starting on that day stays possible.
    let nights = dates_in_range(input.check_in, input.check_out - Duration::days(1));
    if let Some(date) = store.first_blocked_date(&nights).await {
        return HttpResponse::Conflict().body(format!("Date {} is not available", date));
    }

    // 2. Snapshot a quote at the current rates
    let rates = store.get_rates().await;
    let quoted_price =
        PricingService::calculate(input.check_in, input.check_out, input.guests, &rates);

    // 3. Store the request as pending until the host confirms it
    let time = Utc::now();
    let booking = Booking {
        id: Uuid::new_v4(),
        reference: generate_reference(),
        guest_name: input.guest_name,
        email: input.email,
        check_in: input.check_in,
        check_out: input.check_out,
        guests: input.guests,
        message: input.message,
        quoted_price,
        status: BookingStatus::Pending,
        created_at: Some(time),
        updated_at: Some(time),
    };

    println!(
        "Booking request {} created: {} nights, {} guests",
        booking.reference,
        nights.len(),
        booking.guests
    );

    store.insert_booking(booking.clone()).await;

    HttpResponse::Ok().json(booking)
}

pub async fn get_all_bookings(data: web::Data<Arc<AppStore>>) -> impl Responder {
    let store = data.into_inner();
    HttpResponse::Ok().json(store.list_bookings().await)
}

pub async fn get_booking_by_id(
    data: web::Data<Arc<AppStore>>,
    path: web::Path<String>,
) -> impl Responder {
    let store = data.into_inner();

    let booking_id = match Uuid::parse_str(&path.into_inner()) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Invalid booking ID format: {:?}", e);
            return HttpResponse::BadRequest().body("Invalid booking ID format");
        }
    };

    match store.get_booking(&booking_id).await {
        Some(booking) => HttpResponse::Ok().json(booking),
        None => HttpResponse::NotFound().body("Booking not found"),
    }
}

pub async fn confirm_booking(
    data: web::Data<Arc<AppStore>>,
    path: web::Path<String>,
) -> impl Responder {
    let store = data.into_inner();

    let booking_id = match Uuid::parse_str(&path.into_inner()) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Invalid booking ID format: {:?}", e);
            return HttpResponse::BadRequest().body("Invalid booking ID format");
        }
    };

    let mut booking = match store.get_booking(&booking_id).await {
        Some(booking) => booking,
        None => return HttpResponse::NotFound().body("Booking not found"),
    };

    match booking.status {
        BookingStatus::Confirmed => {
            return HttpResponse::Conflict().body("Booking is already confirmed");
        }
        BookingStatus::Cancelled => {
            return HttpResponse::Conflict().body("Cannot confirm a cancelled booking");
        }
        BookingStatus::Pending => {}
    }

    // Close the whole stay including the check-out day, the same inclusive
    // range a feed event would block
    let blocked = dates_in_range(booking.check_in, booking.check_out);
    store.set_availability_bulk(&blocked, false).await;

    booking.status = BookingStatus::Confirmed;
    booking.updated_at = Some(Utc::now());

    if !store.update_booking(booking.clone()).await {
        return HttpResponse::NotFound().body("Booking not found");
    }

    println!(
        "Booking {} confirmed, {} dates closed",
        booking.reference,
        blocked.len()
    );

    HttpResponse::Ok().json(booking)
}

pub async fn cancel_booking(
    data: web::Data<Arc<AppStore>>,
    path: web::Path<String>,
) -> impl Responder {
    let store = data.into_inner();

    let booking_id = match Uuid::parse_str(&path.into_inner()) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Invalid booking ID format: {:?}", e);
            return HttpResponse::BadRequest().body("Invalid booking ID format");
        }
    };

    let mut booking = match store.get_booking(&booking_id).await {
        Some(booking) => booking,
        None => return HttpResponse::NotFound().body("Booking not found"),
    };

    if booking.status == BookingStatus::Cancelled {
        return HttpResponse::Conflict().body("Booking is already cancelled");
    }

    // A confirmed stay had closed its dates; re-open them
    if booking.status == BookingStatus::Confirmed {
        let reopened = dates_in_range(booking.check_in, booking.check_out);
        store.set_availability_bulk(&reopened, true).await;
        println!(
            "Booking {} cancelled, {} dates re-opened",
            booking.reference,
            reopened.len()
        );
    }

    booking.status = BookingStatus::Cancelled;
    booking.updated_at = Some(Utc::now());

    if !store.update_booking(booking.clone()).await {
        return HttpResponse::NotFound().body("Booking not found");
    }

    HttpResponse::Ok().json(booking)
}

fn generate_reference() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect::<String>()
        .to_uppercase()
}

fn is_valid_email(email: &str) -> bool {
    let re = regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?)*$",
    );
    return re.unwrap().is_match(email);
}
