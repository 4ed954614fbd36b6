pub mod availability;
pub mod booking;
pub mod calendar;
pub mod rates;
pub mod stay;
