//! Cost-of-living estimates
//!
//! A pure lookup against a small static table. There is no live provider
//! behind this client; it behaves identically with or without network
//! access, so it needs no fallback path.

use crate::models::CostEstimate;
use tracing::debug;

/// Per-city daily cost table; every other city gets [`DEFAULT_COSTS`]
const CITY_COSTS: &[(&str, CostEstimate)] = &[
    (
        "seoul",
        CostEstimate {
            daily_usd: 100.0,
            meal_usd: 12.0,
            transport_usd: 3.0,
            hotel_usd: 80.0,
        },
    ),
    (
        "tokyo",
        CostEstimate {
            daily_usd: 120.0,
            meal_usd: 15.0,
            transport_usd: 4.0,
            hotel_usd: 100.0,
        },
    ),
    (
        "delhi",
        CostEstimate {
            daily_usd: 40.0,
            meal_usd: 5.0,
            transport_usd: 1.0,
            hotel_usd: 30.0,
        },
    ),
    (
        "lagos",
        CostEstimate {
            daily_usd: 50.0,
            meal_usd: 8.0,
            transport_usd: 2.0,
            hotel_usd: 40.0,
        },
    ),
    (
        "paris",
        CostEstimate {
            daily_usd: 110.0,
            meal_usd: 18.0,
            transport_usd: 3.0,
            hotel_usd: 90.0,
        },
    ),
];

/// Universal estimate for cities not in the table
const DEFAULT_COSTS: CostEstimate = CostEstimate {
    daily_usd: 70.0,
    meal_usd: 10.0,
    transport_usd: 2.5,
    hotel_usd: 60.0,
};

/// Static cost-of-living lookup
#[derive(Debug, Default)]
pub struct CostOfLivingClient;

impl CostOfLivingClient {
    /// Create a new cost-of-living client
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Estimate daily costs for a city, keyed case-insensitively
    ///
    /// The country is accepted for interface symmetry with the other
    /// clients but does not influence the lookup.
    #[must_use]
    pub fn estimate(&self, city: &str, _country: &str) -> CostEstimate {
        let city_lower = city.to_lowercase();
        let estimate = CITY_COSTS
            .iter()
            .find(|(name, _)| *name == city_lower)
            .map_or(DEFAULT_COSTS, |(_, costs)| *costs);

        debug!(city, daily_usd = estimate.daily_usd, "cost estimate");
        estimate
    }
}
