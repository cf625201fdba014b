//! Travel advisory client
//!
//! Looks up one country's government travel-risk advisory from the
//! travel-advisory.info API. The provider needs no credential, so the only
//! fallback triggers are transport failures, bad statuses and shape
//! mismatches; all of them produce a report at level `error` carrying the
//! failure text.

use crate::clients::{FetchError, check_status, http_client};
use crate::config::AdvisoryConfig;
use crate::models::{AdvisoryLevel, AdvisoryReport};
use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, info, warn};

/// Client for the travel-advisory.info country risk API
pub struct AdvisoryClient {
    client: Client,
    base_url: String,
}

impl AdvisoryClient {
    /// Create a new advisory client from configuration
    pub fn new(config: &AdvisoryConfig) -> Result<Self> {
        let client = http_client(config.timeout_seconds)
            .with_context(|| "Failed to create advisory HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Fetch the advisory for an ISO country code
    ///
    /// Never fails: any lookup problem yields a report at level `error`
    /// with the failure text as the message.
    pub async fn fetch(&self, country_code: &str) -> AdvisoryReport {
        match self.fetch_live(country_code).await {
            Ok(report) => {
                info!(
                    country = country_code,
                    level = %report.level,
                    "advisory retrieved"
                );
                report
            }
            Err(err) => {
                warn!(country = country_code, reason = %err, "advisory lookup failed");
                Self::error_report(&err)
            }
        }
    }

    async fn fetch_live(&self, country_code: &str) -> Result<AdvisoryReport, FetchError> {
        let url = format!(
            "{}?countrycode={}",
            self.base_url,
            urlencoding::encode(country_code)
        );
        debug!(url = %url, "requesting advisory");

        let response = check_status(self.client.get(&url).send().await?)?;
        let body: provider::AdvisoryResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Malformed(e.to_string()))?;

        Ok(Self::map_response(&body, country_code))
    }

    /// Map the provider payload onto an [`AdvisoryReport`]
    ///
    /// A country absent from the payload is not an error: the provider has
    /// no data, and the report says so at level `none`.
    fn map_response(body: &provider::AdvisoryResponse, country_code: &str) -> AdvisoryReport {
        let entry = body
            .data
            .as_ref()
            .and_then(|data| data.get(country_code))
            .map(|country| &country.advisory);

        match entry {
            Some(advisory) => {
                let score = advisory.score.unwrap_or(0.0);
                AdvisoryReport {
                    score,
                    level: AdvisoryLevel::from_score(score),
                    message: advisory
                        .message
                        .clone()
                        .unwrap_or_else(|| "No advisory".to_string()),
                    updated: advisory.updated.clone(),
                    source: advisory
                        .source
                        .clone()
                        .unwrap_or_else(|| "Travel Advisory API".to_string()),
                }
            }
            None => AdvisoryReport {
                score: 0.0,
                level: AdvisoryLevel::None,
                message: "Advisory data not available".to_string(),
                updated: None,
                source: "Travel Advisory API".to_string(),
            },
        }
    }

    /// Structurally valid report for a failed lookup
    fn error_report(err: &FetchError) -> AdvisoryReport {
        AdvisoryReport {
            score: 0.0,
            level: AdvisoryLevel::Error,
            message: err.to_string(),
            updated: None,
            source: "Fallback".to_string(),
        }
    }
}

/// travel-advisory.info API response structures
mod provider {
    use serde::Deserialize;
    use std::collections::HashMap;

    /// Top-level advisory response, keyed by country code
    #[derive(Debug, Deserialize)]
    pub struct AdvisoryResponse {
        pub data: Option<HashMap<String, CountryEntry>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct CountryEntry {
        pub advisory: AdvisoryData,
    }

    #[derive(Debug, Deserialize)]
    pub struct AdvisoryData {
        pub score: Option<f64>,
        pub message: Option<String>,
        pub updated: Option<String>,
        pub source: Option<String>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> provider::AdvisoryResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_map_low_score_to_normal_precautions() {
        let body = parse(
            r#"{
                "data": {
                    "KR": {
                        "advisory": {
                            "score": 1.0,
                            "message": "South Korea is generally safe.",
                            "updated": "2025-01-15 08:23:01",
                            "source": "https://example.test/advisories"
                        }
                    }
                }
            }"#,
        );

        let report = AdvisoryClient::map_response(&body, "KR");
        assert_eq!(report.score, 1.0);
        assert_eq!(report.level, AdvisoryLevel::Normal);
        assert_eq!(report.level.to_string(), "Exercise normal precautions");
        assert_eq!(report.message, "South Korea is generally safe.");
        assert_eq!(report.updated.as_deref(), Some("2025-01-15 08:23:01"));
    }

    #[test]
    fn test_map_high_score_to_avoid() {
        let body = parse(
            r#"{"data": {"XX": {"advisory": {"score": 4.8, "message": "Do not travel."}}}}"#,
        );

        let report = AdvisoryClient::map_response(&body, "XX");
        assert_eq!(report.level, AdvisoryLevel::Avoid);
        assert_eq!(report.source, "Travel Advisory API");
    }

    #[test]
    fn test_map_missing_country_to_no_data() {
        let body = parse(r#"{"data": {"KR": {"advisory": {"score": 1.0}}}}"#);

        let report = AdvisoryClient::map_response(&body, "FR");
        assert_eq!(report.level, AdvisoryLevel::None);
        assert_eq!(report.score, 0.0);
        assert_eq!(report.message, "Advisory data not available");
    }

    #[test]
    fn test_map_missing_score_defaults_to_zero() {
        let body = parse(r#"{"data": {"KR": {"advisory": {"message": "No score published"}}}}"#);

        let report = AdvisoryClient::map_response(&body, "KR");
        assert_eq!(report.score, 0.0);
        assert_eq!(report.level, AdvisoryLevel::Normal);
    }

    #[test]
    fn test_error_report_carries_failure_text() {
        let err = FetchError::Network("connection refused".to_string());
        let report = AdvisoryClient::error_report(&err);
        assert_eq!(report.level, AdvisoryLevel::Error);
        assert!(report.message.contains("connection refused"));
        assert_eq!(report.source, "Fallback");
    }

    #[tokio::test]
    async fn test_fetch_unreachable_provider_falls_back() {
        let config = AdvisoryConfig {
            base_url: "http://127.0.0.1:9/api".to_string(),
            timeout_seconds: 1,
        };
        let client = AdvisoryClient::new(&config).unwrap();

        let report = client.fetch("KR").await;
        assert_eq!(report.level, AdvisoryLevel::Error);
        assert!(!report.message.is_empty());
    }
}
