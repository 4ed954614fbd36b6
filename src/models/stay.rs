use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Live price-estimate input, straight from the booking form. Dates arrive
/// as free text; anything missing or unparseable means "not enough input
/// yet", never an error.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EstimateRequest {
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    #[serde(default = "default_guests")]
    pub guests: u32,
}

fn default_guests() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PriceQuote {
    pub number_of_nights: u32,
    pub accommodation_cost: Decimal,
    pub tourist_tax_cost: Decimal,
    pub total_price: Decimal,
    pub is_high_season_stay: bool,
}

/// `quote` is `None` when the inputs were insufficient; the frontend shows
/// its "fill in your dates" placeholder in that case.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EstimateResponse {
    pub quote: Option<PriceQuote>,
}
