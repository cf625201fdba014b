//! Provider clients for the five trip intelligence categories
//!
//! Every client follows the same contract: `fetch` maps a live provider
//! response onto the typed models, and any failure (missing credential,
//! network error, timeout, non-2xx status, malformed payload) is caught
//! locally and replaced with a deterministic fallback value. Callers never
//! see a provider failure; they see a structurally valid result and a
//! warning in the logs.

pub mod advisory;
pub mod cost;
pub mod events;
pub mod recommendation;
pub mod weather;

pub use advisory::AdvisoryClient;
pub use cost::CostOfLivingClient;
pub use events::EventsClient;
pub use recommendation::{RecommendationClient, RecommendationContext};
pub use weather::WeatherClient;

use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Why a live provider call was abandoned in favor of the local fallback
///
/// This never leaves the owning client; it exists so the fallback log line
/// names the failure category.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No credential configured (or the configured value was blank)
    #[error("no API credential configured")]
    MissingCredential,

    /// Transport-level failure before a response arrived
    #[error("network error: {0}")]
    Network(String),

    /// The provider did not answer within the timeout bound
    #[error("request timed out")]
    Timeout,

    /// The provider answered with a non-2xx status
    #[error("provider returned HTTP {0}")]
    Provider(StatusCode),

    /// The response body did not match the expected schema
    #[error("malformed provider response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Provider(status)
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Build the HTTP client for one provider with its timeout bound
pub(crate) fn http_client(timeout_seconds: u32) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds.into()))
        .user_agent(concat!("tripintel/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Reject non-2xx responses before attempting to parse a body
pub(crate) fn check_status(response: reqwest::Response) -> Result<reqwest::Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(FetchError::Provider(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_messages() {
        assert_eq!(
            FetchError::MissingCredential.to_string(),
            "no API credential configured"
        );
        assert!(
            FetchError::Provider(StatusCode::SERVICE_UNAVAILABLE)
                .to_string()
                .contains("503")
        );
        assert!(
            FetchError::Malformed("missing field `results`".into())
                .to_string()
                .contains("results")
        );
    }
}
