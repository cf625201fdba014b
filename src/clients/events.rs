//! Local events client
//!
//! Queries the PredictHQ events API for upcoming events in a city within an
//! inclusive date window, rank-descending, at most ten. Without a
//! credential, or when the live call fails, two synthetic events stand in
//! so the report always has something to show.

use crate::clients::{FetchError, check_status, http_client};
use crate::config::{EventsConfig, usable_key};
use crate::models::{EventCategory, EventItem};
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use reqwest::Client;
use tracing::{debug, info, warn};

/// Events kept from the provider response
const MAX_EVENTS: usize = 10;

/// Client for the PredictHQ events API
pub struct EventsClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl EventsClient {
    /// Create a new events client from configuration
    pub fn new(config: &EventsConfig) -> Result<Self> {
        let client = http_client(config.timeout_seconds)
            .with_context(|| "Failed to create events HTTP client")?;

        Ok(Self {
            client,
            api_key: usable_key(config.api_key.as_deref()).map(str::to_string),
            base_url: config.base_url.clone(),
        })
    }

    /// Fetch events for a city within an inclusive date window
    ///
    /// Never fails: any problem yields the two-event synthetic list.
    pub async fn fetch(&self, city: &str, start: NaiveDate, end: NaiveDate) -> Vec<EventItem> {
        match self.fetch_live(city, start, end).await {
            Ok(events) => {
                info!(city, count = events.len(), "events retrieved");
                events
            }
            Err(err) => {
                warn!(city, reason = %err, "events lookup failed, using synthetic events");
                Self::fallback(city, Utc::now())
            }
        }
    }

    async fn fetch_live(
        &self,
        city: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<EventItem>, FetchError> {
        let api_key = self.api_key.as_deref().ok_or(FetchError::MissingCredential)?;

        debug!(city, %start, %end, "requesting events");

        let window_start = start.to_string();
        let window_end = end.to_string();
        let response = self
            .client
            .get(format!("{}/events", self.base_url))
            .bearer_auth(api_key)
            .header("Accept", "application/json")
            .query(&[
                ("q", city),
                ("start.gte", window_start.as_str()),
                ("start.lte", window_end.as_str()),
                ("sort", "-rank"),
                ("limit", "10"),
            ])
            .send()
            .await?;

        let body: provider::EventsResponse = check_status(response)?
            .json()
            .await
            .map_err(|e| FetchError::Malformed(e.to_string()))?;

        Ok(Self::map_response(&body))
    }

    /// Map provider results, capping the list and clamping ranks
    fn map_response(body: &provider::EventsResponse) -> Vec<EventItem> {
        body.results
            .iter()
            .flatten()
            .take(MAX_EVENTS)
            .map(|event| EventItem {
                title: event.title.clone(),
                category: event.category,
                start: event.start,
                end: event.end,
                location: event
                    .location
                    .as_ref()
                    .filter(|coords| coords.len() >= 2)
                    .map(|coords| (coords[0], coords[1])),
                rank: event.rank.unwrap_or(0).min(100),
            })
            .collect()
    }

    /// Deterministic synthetic events for a frozen clock
    ///
    /// A food festival five days out (rank 85) and a music concert ten days
    /// out (rank 75).
    #[must_use]
    pub fn fallback(city: &str, now: DateTime<Utc>) -> Vec<EventItem> {
        vec![
            EventItem {
                title: format!("{city} Food Festival"),
                category: EventCategory::Festivals,
                start: now + Duration::days(5),
                end: Some(now + Duration::days(7)),
                location: None,
                rank: 85,
            },
            EventItem {
                title: format!("{city} Music Concert"),
                category: EventCategory::Concerts,
                start: now + Duration::days(10),
                end: Some(now + Duration::days(10)),
                location: None,
                rank: 75,
            },
        ]
    }
}

/// PredictHQ events API response structures
mod provider {
    use crate::models::EventCategory;
    use chrono::{DateTime, Utc};
    use serde::Deserialize;

    /// Paged events response; only the first page is consumed
    #[derive(Debug, Deserialize)]
    pub struct EventsResponse {
        pub results: Option<Vec<EventResult>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct EventResult {
        pub title: String,
        pub category: EventCategory,
        pub start: DateTime<Utc>,
        pub end: Option<DateTime<Utc>>,
        /// Longitude/latitude pair
        pub location: Option<Vec<f64>>,
        pub rank: Option<u8>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_map_response_full_entries() {
        let body: provider::EventsResponse = serde_json::from_str(
            r#"{
                "results": [
                    {
                        "title": "Seoul Lantern Festival",
                        "category": "festivals",
                        "start": "2025-06-05T18:00:00Z",
                        "end": "2025-06-07T22:00:00Z",
                        "location": [126.9780, 37.5665],
                        "rank": 92
                    },
                    {
                        "title": "Indie Night",
                        "category": "concerts",
                        "start": "2025-06-06T20:00:00Z",
                        "rank": 61
                    }
                ]
            }"#,
        )
        .unwrap();

        let events = EventsClient::map_response(&body);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].title, "Seoul Lantern Festival");
        assert_eq!(events[0].category, EventCategory::Festivals);
        assert_eq!(events[0].location, Some((126.9780, 37.5665)));
        assert_eq!(events[0].rank, 92);
        assert_eq!(events[1].end, None);
        assert_eq!(events[1].location, None);
    }

    #[test]
    fn test_map_response_defaults_missing_rank() {
        let body: provider::EventsResponse = serde_json::from_str(
            r#"{"results": [{"title": "Pop-up Market", "category": "community", "start": "2025-06-06T10:00:00Z"}]}"#,
        )
        .unwrap();

        let events = EventsClient::map_response(&body);
        assert_eq!(events[0].rank, 0);
    }

    #[test]
    fn test_map_response_caps_at_ten_events() {
        let entries: Vec<String> = (0..14)
            .map(|i| {
                format!(
                    r#"{{"title": "Event {i}", "category": "sports", "start": "2025-06-06T10:00:00Z", "rank": 50}}"#
                )
            })
            .collect();
        let json = format!(r#"{{"results": [{}]}}"#, entries.join(","));
        let body: provider::EventsResponse = serde_json::from_str(&json).unwrap();

        assert_eq!(EventsClient::map_response(&body).len(), 10);
    }

    #[test]
    fn test_map_response_missing_results_is_empty() {
        let body: provider::EventsResponse = serde_json::from_str("{}").unwrap();
        assert!(EventsClient::map_response(&body).is_empty());
    }

    #[test]
    fn test_fallback_shape_for_tokyo() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let events = EventsClient::fallback("Tokyo", now);

        assert_eq!(events.len(), 2);

        assert_eq!(events[0].title, "Tokyo Food Festival");
        assert_eq!(events[0].category, EventCategory::Festivals);
        assert_eq!(events[0].start, now + Duration::days(5));
        assert_eq!(events[0].rank, 85);

        assert_eq!(events[1].title, "Tokyo Music Concert");
        assert_eq!(events[1].category, EventCategory::Concerts);
        assert_eq!(events[1].start, now + Duration::days(10));
        assert_eq!(events[1].rank, 75);
    }

    #[test]
    fn test_fallback_is_reproducible_for_frozen_clock() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(
            EventsClient::fallback("Tokyo", now),
            EventsClient::fallback("Tokyo", now)
        );
    }

    #[tokio::test]
    async fn test_fetch_without_credential_uses_fallback() {
        let config = EventsConfig::default();
        let client = EventsClient::new(&config).unwrap();

        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        let events = client.fetch("Tokyo", start, end).await;

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].rank, 85);
        assert_eq!(events[1].rank, 75);
    }
}
