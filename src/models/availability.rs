use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-date availability record. A date with no entry at all counts as
/// available (open-world default), so only explicitly touched dates ever
/// show up here.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AvailabilityEntry {
    pub date: NaiveDate,
    pub is_available: bool,
}

/// Admin bulk action: force a set of dates open or closed in one shot.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BulkAvailabilityInput {
    pub dates: Vec<NaiveDate>,
    pub is_available: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}
