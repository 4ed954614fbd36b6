use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rust_decimal::Decimal;

use crate::models::rates::RateTable;
use crate::models::stay::PriceQuote;

pub struct PricingService;

impl PricingService {
    /// Price a stay against the given rate table. Returns `None` when the
    /// range is not a real stay (`check_in >= check_out`); the caller shows
    /// a placeholder instead of an estimate in that case.
    pub fn calculate(
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: u32,
        rates: &RateTable,
    ) -> Option<PriceQuote> {
        if check_in >= check_out {
            return None;
        }

        let number_of_nights = (check_out - check_in).num_days() as u32;

        let mut accommodation_cost = Decimal::ZERO;
        let mut is_high_season_stay = false;

        // The checkout day itself is never charged: night i is the night
        // *starting* on check_in + i days.
        for offset in 0..number_of_nights {
            let night = check_in + Duration::days(offset as i64);
            if Self::is_high_season(night) {
                is_high_season_stay = true;
            }
            accommodation_cost += Self::nightly_rate(night, rates);
        }

        let tourist_tax_cost = Decimal::from(guests)
            * Decimal::from(number_of_nights)
            * rates.tourist_tax_per_guest_per_night;

        Some(PriceQuote {
            number_of_nights,
            accommodation_cost,
            tourist_tax_cost,
            total_price: accommodation_cost + tourist_tax_cost,
            is_high_season_stay,
        })
    }

    /// High season covers July and August, nothing else.
    pub fn is_high_season(date: NaiveDate) -> bool {
        matches!(date.month(), 7 | 8)
    }

    /// Weekend pricing runs Friday through Sunday nights (three days, on
    /// purpose: Friday arrivals pay weekend rates here).
    pub fn is_weekend_night(date: NaiveDate) -> bool {
        matches!(date.weekday(), Weekday::Fri | Weekday::Sat | Weekday::Sun)
    }

    /// Rate for a single night, picked from the four table values by the
    /// season and weekend rules above.
    pub fn nightly_rate(date: NaiveDate, rates: &RateTable) -> Decimal {
        let season = if Self::is_high_season(date) {
            &rates.high_season
        } else {
            &rates.low_season
        };

        if Self::is_weekend_night(date) {
            season.weekend
        } else {
            season.weekday
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rates::SeasonRates;
    use rust_decimal_macros::dec;

    fn test_rates() -> RateTable {
        // Distinct values per bucket so a wrong rate pick shows up in totals
        RateTable {
            low_season: SeasonRates {
                weekday: dec!(10),
                weekend: dec!(20),
            },
            high_season: SeasonRates {
                weekday: dec!(30),
                weekend: dec!(40),
            },
            tourist_tax_per_guest_per_night: dec!(1.50),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_nights_count_excludes_checkout_day() {
        // 2024-07-01 (Mon) to 2024-07-05 (Fri): nights Mon-Thu, 4 in total.
        // The Friday checkout night is never charged, so no weekend rate
        // should appear.
        let quote =
            PricingService::calculate(date(2024, 7, 1), date(2024, 7, 5), 2, &test_rates())
                .unwrap();

        assert_eq!(quote.number_of_nights, 4);
        assert_eq!(quote.accommodation_cost, dec!(120)); // 4 * 30, high weekday only
        assert_eq!(quote.tourist_tax_cost, dec!(12)); // 2 guests * 4 nights * 1.50
        assert_eq!(quote.total_price, dec!(132));
        assert!(quote.is_high_season_stay);
    }

    #[test]
    fn test_no_result_for_empty_or_reversed_range() {
        let rates = test_rates();
        assert!(PricingService::calculate(date(2024, 7, 1), date(2024, 7, 1), 2, &rates).is_none());
        assert!(PricingService::calculate(date(2024, 7, 5), date(2024, 7, 1), 2, &rates).is_none());
    }

    #[test]
    fn test_high_season_is_july_and_august_only() {
        assert!(PricingService::is_high_season(date(2024, 7, 15)));
        assert!(PricingService::is_high_season(date(2024, 8, 1)));
        assert!(!PricingService::is_high_season(date(2024, 6, 30)));
        assert!(!PricingService::is_high_season(date(2024, 9, 1)));
        assert!(!PricingService::is_high_season(date(2024, 12, 31)));
    }

    #[test]
    fn test_weekend_runs_friday_through_sunday() {
        assert!(PricingService::is_weekend_night(date(2024, 6, 7))); // Fri
        assert!(PricingService::is_weekend_night(date(2024, 6, 8))); // Sat
        assert!(PricingService::is_weekend_night(date(2024, 6, 9))); // Sun
        assert!(!PricingService::is_weekend_night(date(2024, 6, 10))); // Mon
        assert!(!PricingService::is_weekend_night(date(2024, 6, 6))); // Thu
    }

    #[test]
    fn test_weekend_rate_selected_in_both_seasons() {
        let rates = test_rates();
        // Low season Friday night
        assert_eq!(PricingService::nightly_rate(date(2024, 6, 7), &rates), dec!(20));
        // High season Friday night
        assert_eq!(PricingService::nightly_rate(date(2024, 8, 2), &rates), dec!(40));
        // Low season Tuesday night
        assert_eq!(PricingService::nightly_rate(date(2024, 1, 16), &rates), dec!(10));
        // High season Wednesday night
        assert_eq!(PricingService::nightly_rate(date(2024, 7, 3), &rates), dec!(30));
    }

    #[test]
    fn test_stay_crossing_into_july_counts_as_high_season() {
        // One low night (Jun 30, Sunday) and one high night (Jul 1, Monday)
        let quote =
            PricingService::calculate(date(2024, 6, 30), date(2024, 7, 2), 1, &test_rates())
                .unwrap();

        assert_eq!(quote.number_of_nights, 2);
        assert_eq!(quote.accommodation_cost, dec!(50)); // 20 (low weekend) + 30 (high weekday)
        assert!(quote.is_high_season_stay);
    }

    #[test]
    fn test_low_season_stay_keeps_flag_off() {
        let quote =
            PricingService::calculate(date(2024, 1, 15), date(2024, 1, 17), 1, &test_rates())
                .unwrap();
        assert!(!quote.is_high_season_stay);
    }

    #[test]
    fn test_total_is_exact_sum_of_parts() {
        // Awkward decimal tax rate; Decimal arithmetic must stay exact
        let mut rates = test_rates();
        rates.tourist_tax_per_guest_per_night = dec!(1.35);

        let quote =
            PricingService::calculate(date(2024, 3, 4), date(2024, 3, 11), 3, &rates).unwrap();

        assert_eq!(quote.number_of_nights, 7);
        assert_eq!(quote.tourist_tax_cost, dec!(28.35)); // 3 * 7 * 1.35
        assert_eq!(
            quote.total_price,
            quote.accommodation_cost + quote.tourist_tax_cost
        );
    }

    #[test]
    fn test_tourist_tax_scales_with_guests_and_nights() {
        let rates = test_rates();
        let one_guest =
            PricingService::calculate(date(2024, 2, 5), date(2024, 2, 8), 1, &rates).unwrap();
        let four_guests =
            PricingService::calculate(date(2024, 2, 5), date(2024, 2, 8), 4, &rates).unwrap();

        assert_eq!(one_guest.tourist_tax_cost, dec!(4.50)); // 1 * 3 * 1.50
        assert_eq!(four_guests.tourist_tax_cost, dec!(18.00)); // 4 * 3 * 1.50
        // Accommodation does not depend on the guest count
        assert_eq!(one_guest.accommodation_cost, four_guests.accommodation_cost);
    }
}
