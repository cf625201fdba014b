//! Weather forecast client
//!
//! Fetches the OpenWeatherMap 5-day/3-hour forecast for a city and keeps
//! the first eight points in provider order. Without a credential, or when
//! the live call fails, the client synthesizes an eight-point forecast at
//! three-hour increments so downstream consumers always see the same shape.

use crate::clients::{FetchError, check_status, http_client};
use crate::config::{WeatherConfig, usable_key};
use crate::models::{ForecastPoint, WeatherReport};
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use reqwest::Client;
use tracing::{debug, info, warn};

/// Forecast points kept from the provider response
const MAX_FORECAST_POINTS: usize = 8;

/// Client for the OpenWeatherMap forecast API
pub struct WeatherClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl WeatherClient {
    /// Create a new weather client from configuration
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = http_client(config.timeout_seconds)
            .with_context(|| "Failed to create weather HTTP client")?;

        Ok(Self {
            client,
            api_key: usable_key(config.api_key.as_deref()).map(str::to_string),
            base_url: config.base_url.clone(),
        })
    }

    /// Fetch the forecast for a city, optionally scoped to a country code
    ///
    /// Never fails: any problem yields the synthetic fallback forecast.
    pub async fn fetch(&self, city: &str, country_code: Option<&str>) -> WeatherReport {
        match self.fetch_live(city, country_code).await {
            Ok(report) => {
                info!(
                    city = %report.city,
                    points = report.forecasts.len(),
                    "forecast retrieved"
                );
                report
            }
            Err(err) => {
                warn!(city, reason = %err, "weather lookup failed, using synthetic forecast");
                Self::fallback(city, Utc::now())
            }
        }
    }

    async fn fetch_live(
        &self,
        city: &str,
        country_code: Option<&str>,
    ) -> Result<WeatherReport, FetchError> {
        let api_key = self.api_key.as_deref().ok_or(FetchError::MissingCredential)?;

        let location = match country_code {
            Some(code) => format!("{city},{code}"),
            None => city.to_string(),
        };
        debug!(location = %location, "requesting forecast");

        let response = self
            .client
            .get(format!("{}/forecast", self.base_url))
            .query(&[("q", location.as_str()), ("appid", api_key), ("units", "metric")])
            .send()
            .await?;

        let body: provider::ForecastResponse = check_status(response)?
            .json()
            .await
            .map_err(|e| FetchError::Malformed(e.to_string()))?;

        Self::map_response(&body)
    }

    /// Map the provider payload, keeping the first eight points
    fn map_response(body: &provider::ForecastResponse) -> Result<WeatherReport, FetchError> {
        let mut forecasts = Vec::with_capacity(MAX_FORECAST_POINTS);

        for item in body.list.iter().take(MAX_FORECAST_POINTS) {
            // Timestamps are naive UTC in "2025-06-01 12:00:00" form
            let time = NaiveDateTime::parse_from_str(&item.dt_txt, "%Y-%m-%d %H:%M:%S")
                .map(|dt| dt.and_utc())
                .map_err(|e| FetchError::Malformed(format!("bad timestamp '{}': {e}", item.dt_txt)))?;

            forecasts.push(ForecastPoint {
                time,
                temp_c: item.main.temp,
                feels_like_c: item.main.feels_like,
                description: item
                    .weather
                    .first()
                    .map(|w| w.description.clone())
                    .unwrap_or_else(|| "unknown".to_string()),
                humidity_pct: item.main.humidity,
                wind_speed_mps: item.wind.as_ref().map_or(0.0, |w| w.speed),
            });
        }

        Ok(WeatherReport {
            city: body.city.name.clone(),
            country: body.city.country.clone(),
            forecasts,
        })
    }

    /// Deterministic synthetic forecast for a frozen clock
    ///
    /// Eight points at three-hour increments from `now`, warming one degree
    /// per step from a 25°C base.
    #[must_use]
    pub fn fallback(city: &str, now: DateTime<Utc>) -> WeatherReport {
        let forecasts = (0..MAX_FORECAST_POINTS as i64)
            .map(|i| ForecastPoint {
                time: now + Duration::hours(3 * i),
                temp_c: 25.0 + i as f32,
                feels_like_c: 24.0 + i as f32,
                description: "partly cloudy".to_string(),
                humidity_pct: 60,
                wind_speed_mps: 3.5,
            })
            .collect();

        WeatherReport {
            city: city.to_string(),
            country: "Unknown".to_string(),
            forecasts,
        }
    }
}

/// OpenWeatherMap forecast API response structures
mod provider {
    use serde::Deserialize;

    /// 5-day/3-hour forecast response
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub list: Vec<ForecastItem>,
        pub city: CityInfo,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastItem {
        pub dt_txt: String,
        pub main: MainData,
        #[serde(default)]
        pub weather: Vec<WeatherDescription>,
        pub wind: Option<WindData>,
    }

    #[derive(Debug, Deserialize)]
    pub struct MainData {
        pub temp: f32,
        pub feels_like: f32,
        pub humidity: u8,
    }

    #[derive(Debug, Deserialize)]
    pub struct WeatherDescription {
        pub description: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct WindData {
        pub speed: f32,
    }

    #[derive(Debug, Deserialize)]
    pub struct CityInfo {
        pub name: String,
        pub country: String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn forecast_item(dt_txt: &str, temp: f32) -> String {
        format!(
            r#"{{
                "dt_txt": "{dt_txt}",
                "main": {{"temp": {temp}, "feels_like": {}, "humidity": 55}},
                "weather": [{{"description": "light rain"}}],
                "wind": {{"speed": 4.2}}
            }}"#,
            temp - 1.0
        )
    }

    fn forecast_json(items: usize) -> String {
        let list: Vec<String> = (0..items)
            .map(|i| forecast_item(&format!("2025-06-01 {:02}:00:00", (i * 3) % 24), 20.0 + i as f32))
            .collect();
        format!(
            r#"{{"list": [{}], "city": {{"name": "Seoul", "country": "KR"}}}}"#,
            list.join(",")
        )
    }

    #[test]
    fn test_map_response_truncates_to_eight_points() {
        let body: super::provider::ForecastResponse =
            serde_json::from_str(&forecast_json(12)).unwrap();
        let report = WeatherClient::map_response(&body).unwrap();

        assert_eq!(report.city, "Seoul");
        assert_eq!(report.country, "KR");
        assert_eq!(report.forecasts.len(), 8);
        assert_eq!(report.forecasts[0].temp_c, 20.0);
        assert_eq!(report.forecasts[0].description, "light rain");
        assert_eq!(report.forecasts[0].humidity_pct, 55);
        assert_eq!(report.forecasts[0].wind_speed_mps, 4.2);
    }

    #[test]
    fn test_map_response_short_list_kept_as_is() {
        let body: super::provider::ForecastResponse =
            serde_json::from_str(&forecast_json(3)).unwrap();
        let report = WeatherClient::map_response(&body).unwrap();
        assert_eq!(report.forecasts.len(), 3);
    }

    #[test]
    fn test_map_response_bad_timestamp_fails_closed() {
        let json = format!(
            r#"{{"list": [{}], "city": {{"name": "Seoul", "country": "KR"}}}}"#,
            forecast_item("not-a-timestamp", 20.0)
        );
        let body: super::provider::ForecastResponse = serde_json::from_str(&json).unwrap();
        assert!(matches!(
            WeatherClient::map_response(&body),
            Err(FetchError::Malformed(_))
        ));
    }

    #[test]
    fn test_fallback_shape_for_paris() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        let report = WeatherClient::fallback("Paris", now);

        assert_eq!(report.city, "Paris");
        assert_eq!(report.country, "Unknown");
        assert_eq!(report.forecasts.len(), 8);

        for (i, point) in report.forecasts.iter().enumerate() {
            assert_eq!(point.time, now + Duration::hours(3 * i as i64));
            assert_eq!(point.temp_c, 25.0 + i as f32);
            assert_eq!(point.feels_like_c, 24.0 + i as f32);
            assert_eq!(point.description, "partly cloudy");
            assert_eq!(point.humidity_pct, 60);
            assert_eq!(point.wind_speed_mps, 3.5);
        }
        assert_eq!(report.forecasts[7].temp_c, 32.0);
    }

    #[test]
    fn test_fallback_is_reproducible_for_frozen_clock() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        assert_eq!(
            WeatherClient::fallback("Paris", now),
            WeatherClient::fallback("Paris", now)
        );
    }

    #[tokio::test]
    async fn test_fetch_without_credential_uses_fallback() {
        let config = WeatherConfig {
            api_key: None,
            ..WeatherConfig::default()
        };
        let client = WeatherClient::new(&config).unwrap();

        let report = client.fetch("Paris", None).await;
        assert_eq!(report.forecasts.len(), 8);
        assert_eq!(report.forecasts[0].temp_c, 25.0);
    }

    #[tokio::test]
    async fn test_fetch_with_blank_credential_uses_fallback() {
        let config = WeatherConfig {
            api_key: Some("   ".to_string()),
            ..WeatherConfig::default()
        };
        let client = WeatherClient::new(&config).unwrap();

        let report = client.fetch("Paris", Some("FR")).await;
        assert_eq!(report.country, "Unknown");
        assert_eq!(report.forecasts.len(), 8);
    }
}
