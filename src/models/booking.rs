use crate::models::stay::PriceQuote;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Booking {
    pub id: Uuid,
    /// Short code the guest gets back in the confirmation mail / on screen.
    pub reference: String,
    pub guest_name: String,
    pub email: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub message: Option<String>,
    /// Estimate taken with the rate table current at request time. Kept on
    /// the booking so later rate edits do not rewrite what was quoted.
    pub quoted_price: Option<PriceQuote>,
    pub status: BookingStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BookingInput {
    pub guest_name: String,
    pub email: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub message: Option<String>,
}
