//! Trip report coordinator
//!
//! `TripPlanner` owns the five provider clients and assembles one composite
//! report per trip request. Clients are invoked sequentially and are
//! mutually independent; each guarantees a well-formed result, so the
//! composite report always fully succeeds. The recommendation runs last so
//! its prompt can summarize the other categories.

use crate::clients::{
    AdvisoryClient, CostOfLivingClient, EventsClient, RecommendationClient,
    RecommendationContext, WeatherClient,
};
use crate::config::TripIntelConfig;
use crate::destinations;
use crate::models::{BudgetAnalysis, EventItem, TripReport, TripRequest, WeatherReport};
use anyhow::Result;
use chrono::Utc;
use tracing::{info, instrument};

/// Coordinates the five provider clients for one trip at a time
pub struct TripPlanner {
    advisory: AdvisoryClient,
    weather: WeatherClient,
    events: EventsClient,
    costs: CostOfLivingClient,
    recommendations: RecommendationClient,
}

impl TripPlanner {
    /// Build all clients from one configuration snapshot
    pub fn new(config: &TripIntelConfig) -> Result<Self> {
        Ok(Self {
            advisory: AdvisoryClient::new(&config.advisory)?,
            weather: WeatherClient::new(&config.weather)?,
            events: EventsClient::new(&config.events)?,
            costs: CostOfLivingClient::new(),
            recommendations: RecommendationClient::new(&config.ai)?,
        })
    }

    /// Gather every intelligence category for one trip
    #[instrument(skip(self, request), fields(destination = %request.destination))]
    pub async fn assemble(&self, request: &TripRequest) -> TripReport {
        let country_code = request
            .country_code
            .clone()
            .unwrap_or_else(|| destinations::country_code_for(&request.destination).to_string());
        let city = destinations::city_for(&request.destination).to_string();

        info!(city = %city, country = %country_code, "gathering trip intelligence");

        let advisory = self.advisory.fetch(&country_code).await;
        let weather = self.weather.fetch(&city, Some(&country_code)).await;
        let events = self
            .events
            .fetch(&city, request.start_date, request.end_date)
            .await;
        let costs = self.costs.estimate(&city, &country_code);
        let budget = BudgetAnalysis::from_costs(&costs, request.budget_usd, request.duration_days());

        let context = RecommendationContext {
            destination: request.destination.clone(),
            budget_usd: request.budget_usd,
            duration_days: request.duration_days(),
            interests: request.interests.clone(),
            history: request.history.clone(),
            weather_summary: Some(Self::weather_summary(&weather)),
            events_summary: Some(Self::events_summary(&events)),
            advisory_level: Some(advisory.level.to_string()),
        };
        let recommendation = self.recommendations.fetch(&context).await;

        info!(events = events.len(), feasible = budget.feasible, "report assembled");

        TripReport {
            destination: request.destination.clone(),
            generated_at: Utc::now(),
            advisory,
            weather,
            events,
            costs,
            budget,
            recommendation,
        }
    }

    /// One-line weather digest for the recommendation prompt
    fn weather_summary(weather: &WeatherReport) -> String {
        match (weather.forecasts.first(), weather.average_temp_c()) {
            (Some(first), Some(avg)) => {
                format!("{}, {avg:.1}°C average", first.description)
            }
            _ => "Not available".to_string(),
        }
    }

    /// One-line events digest for the recommendation prompt
    fn events_summary(events: &[EventItem]) -> String {
        if events.is_empty() {
            "None found".to_string()
        } else {
            format!("{} events found", events.len())
        }
    }
}
