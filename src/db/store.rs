use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::availability::AvailabilityEntry;
use crate::models::booking::Booking;
use crate::models::rates::RateTable;

/// Process-local storage behind the HTTP handlers. One apartment, one rate
/// table, one availability calendar; everything fits in a few maps guarded
/// by async locks and handed to handlers as `web::Data<Arc<AppStore>>`.
pub struct AppStore {
    /// Per-date flag; a date with no entry counts as available.
    availability: RwLock<BTreeMap<NaiveDate, bool>>,
    rates: RwLock<RateTable>,
    bookings: RwLock<HashMap<Uuid, Booking>>,
}

impl AppStore {
    pub fn new(rates: RateTable) -> Self {
        Self {
            availability: RwLock::new(BTreeMap::new()),
            rates: RwLock::new(rates),
            bookings: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get_rates(&self) -> RateTable {
        self.rates.read().await.clone()
    }

    pub async fn update_rates(&self, rates: RateTable) {
        *self.rates.write().await = rates;
    }

    pub async fn set_availability(&self, date: NaiveDate, is_available: bool) {
        self.availability.write().await.insert(date, is_available);
    }

    /// Upsert a whole batch under a single write lock, so a sync run or an
    /// admin bulk edit lands as one unit and readers never see half of it.
    /// Last write wins per date.
    pub async fn set_availability_bulk(&self, dates: &[NaiveDate], is_available: bool) -> usize {
        let mut map = self.availability.write().await;
        for date in dates {
            map.insert(*date, is_available);
        }
        dates.len()
    }

    /// Stored entries in date order, optionally clipped to an inclusive
    /// `from..=to` window.
    pub async fn availability_entries(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Vec<AvailabilityEntry> {
        let map = self.availability.read().await;
        map.iter()
            .filter(|(date, _)| {
                from.map_or(true, |f| **date >= f) && to.map_or(true, |t| **date <= t)
            })
            .map(|(date, is_available)| AvailabilityEntry {
                date: *date,
                is_available: *is_available,
            })
            .collect()
    }

    /// First date in `dates` that is explicitly marked unavailable, if any.
    pub async fn first_blocked_date(&self, dates: &[NaiveDate]) -> Option<NaiveDate> {
        let map = self.availability.read().await;
        dates.iter().copied().find(|date| map.get(date) == Some(&false))
    }

    pub async fn blocked_date_count(&self) -> usize {
        self.availability
            .read()
            .await
            .values()
            .filter(|is_available| !**is_available)
            .count()
    }

    pub async fn insert_booking(&self, booking: Booking) {
        self.bookings.write().await.insert(booking.id, booking);
    }

    pub async fn get_booking(&self, id: &Uuid) -> Option<Booking> {
        self.bookings.read().await.get(id).cloned()
    }

    /// Newest first, the order the admin list renders in.
    pub async fn list_bookings(&self) -> Vec<Booking> {
        let mut bookings: Vec<Booking> = self.bookings.read().await.values().cloned().collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        bookings
    }

    /// Replace a stored booking. Returns false when the id was never
    /// inserted, so callers can answer 404 instead of silently creating.
    pub async fn update_booking(&self, booking: Booking) -> bool {
        let mut map = self.bookings.write().await;
        if map.contains_key(&booking.id) {
            map.insert(booking.id, booking);
            true
        } else {
            false
        }
    }

    pub async fn booking_count(&self) -> usize {
        self.bookings.read().await.len()
    }
}

pub fn create_store() -> Arc<AppStore> {
    println!("Initializing in-memory application store");

    let rates = RateTable::from_env();
    println!(
        "Nightly rates loaded: low season {}/{}, high season {}/{} (weekday/weekend), tourist tax {}",
        rates.low_season.weekday,
        rates.low_season.weekend,
        rates.high_season.weekday,
        rates.high_season.weekend,
        rates.tourist_tax_per_guest_per_night
    );

    Arc::new(AppStore::new(rates))
}
