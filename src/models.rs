//! Data models for trip intelligence reports
//!
//! This module contains the value records produced by the provider clients
//! and the composite report assembled by the trip planner. All of them are
//! plain, immutable-once-built structures that live for a single
//! request/response cycle.

use crate::TripIntelError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk band derived from a numeric advisory score
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdvisoryLevel {
    /// Score below 2.5
    Normal,
    /// Score in [2.5, 3.5)
    Increased,
    /// Score in [3.5, 4.5)
    Reconsider,
    /// Score of 4.5 and above
    Avoid,
    /// Provider had no data for the country
    None,
    /// Lookup failed; the report message carries the error text
    Error,
}

impl AdvisoryLevel {
    /// Map a provider score (0-5) onto a risk band using fixed thresholds
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score < 2.5 {
            Self::Normal
        } else if score < 3.5 {
            Self::Increased
        } else if score < 4.5 {
            Self::Reconsider
        } else {
            Self::Avoid
        }
    }
}

impl fmt::Display for AdvisoryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Normal => "Exercise normal precautions",
            Self::Increased => "Exercise increased caution",
            Self::Reconsider => "Reconsider travel",
            Self::Avoid => "Do not travel",
            Self::None => "No data",
            Self::Error => "Error",
        };
        f.write_str(text)
    }
}

/// Government travel-risk advisory for one country
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AdvisoryReport {
    /// Provider-assigned risk score (0-5)
    pub score: f64,
    /// Risk band derived from the score
    pub level: AdvisoryLevel,
    /// Human-readable advisory message
    pub message: String,
    /// When the provider last updated the advisory
    pub updated: Option<String>,
    /// Where the advisory came from
    pub source: String,
}

/// One point of a multi-point weather forecast
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastPoint {
    /// Timestamp for this forecast point
    pub time: DateTime<Utc>,
    /// Temperature in Celsius
    pub temp_c: f32,
    /// Perceived temperature in Celsius
    pub feels_like_c: f32,
    /// Human-readable description of conditions
    pub description: String,
    /// Relative humidity percentage (0-100)
    pub humidity_pct: u8,
    /// Wind speed in m/s
    pub wind_speed_mps: f32,
}

/// Forecast for a city, at most eight points in chronological order
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherReport {
    /// City the forecast covers
    pub city: String,
    /// Country code reported by the provider
    pub country: String,
    /// Forecast points, provider order preserved
    pub forecasts: Vec<ForecastPoint>,
}

impl WeatherReport {
    /// Average temperature across all forecast points
    #[must_use]
    pub fn average_temp_c(&self) -> Option<f32> {
        if self.forecasts.is_empty() {
            return None;
        }
        let sum: f32 = self.forecasts.iter().map(|point| point.temp_c).sum();
        Some(sum / self.forecasts.len() as f32)
    }
}

/// Event category as reported by the events provider
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum EventCategory {
    Festivals,
    Concerts,
    Sports,
    Community,
    Conferences,
    Expos,
    PerformingArts,
    Observances,
    /// Any category string this crate does not know about
    #[serde(other)]
    Other,
}

/// A single upcoming event
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EventItem {
    /// Event title
    pub title: String,
    /// Provider category
    pub category: EventCategory,
    /// Event start time
    pub start: DateTime<Utc>,
    /// Event end time, absent for open-ended listings
    pub end: Option<DateTime<Utc>>,
    /// Longitude/latitude pair when the provider supplies one
    pub location: Option<(f64, f64)>,
    /// Provider-assigned relevance rank (0-100)
    pub rank: u8,
}

/// Daily cost-of-living estimate in US dollars
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct CostEstimate {
    pub daily_usd: f64,
    pub meal_usd: f64,
    pub transport_usd: f64,
    pub hotel_usd: f64,
}

/// Free-form, markdown-flavored recommendation text
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Recommendation {
    pub body: String,
}

/// Budget feasibility derived from a cost estimate and the trip parameters
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BudgetAnalysis {
    /// Estimated daily spend
    pub daily_usd: f64,
    /// Daily spend multiplied by trip duration
    pub total_estimated_usd: f64,
    /// Budget minus the total estimate (negative when over budget)
    pub remaining_usd: f64,
    /// Budget as a percentage of the estimate, capped at 100
    pub feasibility_pct: f64,
    /// Whether the budget covers the estimate
    pub feasible: bool,
}

impl BudgetAnalysis {
    /// Derive a feasibility analysis from a cost estimate
    #[must_use]
    pub fn from_costs(costs: &CostEstimate, budget_usd: f64, duration_days: u32) -> Self {
        let total_estimated_usd = costs.daily_usd * f64::from(duration_days);
        let remaining_usd = budget_usd - total_estimated_usd;
        let feasibility_pct = if total_estimated_usd > 0.0 {
            (budget_usd / total_estimated_usd * 100.0).min(100.0)
        } else {
            100.0
        };

        Self {
            daily_usd: costs.daily_usd,
            total_estimated_usd,
            remaining_usd,
            feasibility_pct,
            feasible: remaining_usd >= 0.0,
        }
    }
}

/// Parameters for one trip intelligence request
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TripRequest {
    /// Free-form destination name (country or city)
    pub destination: String,
    /// ISO country code override; resolved from the destination when absent
    pub country_code: Option<String>,
    /// First day of the trip
    pub start_date: NaiveDate,
    /// Last day of the trip (inclusive)
    pub end_date: NaiveDate,
    /// Total budget in US dollars
    pub budget_usd: f64,
    /// Traveler interests, fed into the recommendation prompt
    pub interests: Vec<String>,
    /// Destinations already visited
    pub history: Vec<String>,
}

impl TripRequest {
    /// Trip length in days, counting both endpoints; never less than one
    #[must_use]
    pub fn duration_days(&self) -> u32 {
        let days = (self.end_date - self.start_date).num_days() + 1;
        u32::try_from(days.max(1)).unwrap_or(1)
    }

    /// Validate the request before any provider is contacted
    pub fn validate(&self) -> Result<(), TripIntelError> {
        if self.destination.trim().is_empty() {
            return Err(TripIntelError::validation("destination cannot be empty"));
        }

        if self.end_date < self.start_date {
            return Err(TripIntelError::validation(format!(
                "end date {} is before start date {}",
                self.end_date, self.start_date
            )));
        }

        if self.budget_usd <= 0.0 {
            return Err(TripIntelError::validation(
                "budget must be greater than zero",
            ));
        }

        Ok(())
    }
}

/// Composite report merging every provider category for one trip
///
/// Each client independently guarantees a well-formed result, so assembling
/// this report cannot partially fail: all categories are always populated.
#[derive(Debug, Serialize, Clone)]
pub struct TripReport {
    /// Destination as given in the request
    pub destination: String,
    /// When the report was assembled
    pub generated_at: DateTime<Utc>,
    pub advisory: AdvisoryReport,
    pub weather: WeatherReport,
    pub events: Vec<EventItem>,
    pub costs: CostEstimate,
    pub budget: BudgetAnalysis,
    pub recommendation: Recommendation,
}
