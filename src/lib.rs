//! `TripIntel` - travel intelligence aggregation
//!
//! This library gathers travel-risk advisories, weather forecasts, local
//! events, cost-of-living estimates and AI-generated recommendations from
//! third-party APIs, and merges them into a single trip report. Every
//! provider client degrades to deterministic local data when no credential
//! is configured or the live call fails, so a report can always be built.

pub mod clients;
pub mod config;
pub mod coordinator;
pub mod destinations;
pub mod discovery;
pub mod error;
pub mod models;

// Re-export core types for public API
pub use clients::{
    AdvisoryClient, CostOfLivingClient, EventsClient, RecommendationClient,
    RecommendationContext, WeatherClient,
};
pub use config::TripIntelConfig;
pub use coordinator::TripPlanner;
pub use error::TripIntelError;
pub use models::{
    AdvisoryLevel, AdvisoryReport, BudgetAnalysis, CostEstimate, EventCategory, EventItem,
    ForecastPoint, Recommendation, TripReport, TripRequest, WeatherReport,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
