use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

const DEFAULT_LOW_WEEKDAY: Decimal = dec!(65);
const DEFAULT_LOW_WEEKEND: Decimal = dec!(75);
const DEFAULT_HIGH_WEEKDAY: Decimal = dec!(95);
const DEFAULT_HIGH_WEEKEND: Decimal = dec!(110);
const DEFAULT_TOURIST_TAX: Decimal = dec!(1.50); // per guest per night

/// Nightly rates for one season bucket.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct SeasonRates {
    pub weekday: Decimal,
    pub weekend: Decimal,
}

/// The full rate configuration edited from the admin panel. The calculator
/// reads it as-is and performs no validation; whoever writes it is expected
/// to supply non-negative numbers.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateTable {
    pub low_season: SeasonRates,
    pub high_season: SeasonRates,
    pub tourist_tax_per_guest_per_night: Decimal,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            low_season: SeasonRates {
                weekday: DEFAULT_LOW_WEEKDAY,
                weekend: DEFAULT_LOW_WEEKEND,
            },
            high_season: SeasonRates {
                weekday: DEFAULT_HIGH_WEEKDAY,
                weekend: DEFAULT_HIGH_WEEKEND,
            },
            tourist_tax_per_guest_per_night: DEFAULT_TOURIST_TAX,
        }
    }
}

impl RateTable {
    /// Seed the rate table from environment variables or use defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            low_season: SeasonRates {
                weekday: std::env::var("RATE_LOW_WEEKDAY")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.low_season.weekday),
                weekend: std::env::var("RATE_LOW_WEEKEND")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.low_season.weekend),
            },
            high_season: SeasonRates {
                weekday: std::env::var("RATE_HIGH_WEEKDAY")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.high_season.weekday),
                weekend: std::env::var("RATE_HIGH_WEEKEND")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.high_season.weekend),
            },
            tourist_tax_per_guest_per_night: std::env::var("RATE_TOURIST_TAX")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.tourist_tax_per_guest_per_night),
        }
    }
}
