//! AI recommendation client
//!
//! Sends a structured travel prompt to an OpenRouter-hosted language model
//! and returns the completion verbatim; the text is opaque prose and is
//! never parsed. Without a credential, or when the call fails, a fixed
//! three-part template interpolating only the destination stands in.

use crate::clients::{FetchError, check_status, http_client};
use crate::config::{AiConfig, usable_key};
use crate::models::Recommendation;
use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Context embedded into the recommendation prompt
#[derive(Debug, Clone, Default)]
pub struct RecommendationContext {
    pub destination: String,
    pub budget_usd: f64,
    pub duration_days: u32,
    pub interests: Vec<String>,
    pub history: Vec<String>,
    /// One-line weather digest from the coordinator, when available
    pub weather_summary: Option<String>,
    /// One-line events digest from the coordinator, when available
    pub events_summary: Option<String>,
    /// Advisory level text from the coordinator, when available
    pub advisory_level: Option<String>,
}

/// Client for OpenRouter chat completions
pub struct RecommendationClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl RecommendationClient {
    /// Create a new recommendation client from configuration
    pub fn new(config: &AiConfig) -> Result<Self> {
        let client = http_client(config.timeout_seconds)
            .with_context(|| "Failed to create recommendation HTTP client")?;

        Ok(Self {
            client,
            api_key: usable_key(config.api_key.as_deref()).map(str::to_string),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    /// Generate a recommendation for the given context
    ///
    /// Never fails: any problem yields the templated fallback text.
    pub async fn fetch(&self, context: &RecommendationContext) -> Recommendation {
        match self.fetch_live(context).await {
            Ok(recommendation) => {
                info!(
                    destination = %context.destination,
                    chars = recommendation.body.len(),
                    "recommendation generated"
                );
                recommendation
            }
            Err(err) => {
                warn!(
                    destination = %context.destination,
                    reason = %err,
                    "recommendation call failed, using template"
                );
                Self::fallback(&context.destination)
            }
        }
    }

    async fn fetch_live(
        &self,
        context: &RecommendationContext,
    ) -> Result<Recommendation, FetchError> {
        let api_key = self.api_key.as_deref().ok_or(FetchError::MissingCredential)?;

        let prompt = Self::build_prompt(context);
        debug!(model = %self.model, "requesting chat completion");

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let body: ChatResponse = check_status(response)?
            .json()
            .await
            .map_err(|e| FetchError::Malformed(e.to_string()))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| FetchError::Malformed("completion had no choices".to_string()))?;

        // The model's prose is returned verbatim, no validation
        Ok(Recommendation { body: content })
    }

    /// Build the natural-language prompt from the trip context
    fn build_prompt(context: &RecommendationContext) -> String {
        format!(
            "Based on this travel context, provide a brief personalized recommendation:\n\
             \n\
             Destination: {destination}\n\
             Budget: ${budget:.0}\n\
             Duration: {duration} days\n\
             Interests: {interests}\n\
             Travel History: {history}\n\
             \n\
             Weather: {weather}\n\
             Events: {events}\n\
             Advisory: {advisory}\n\
             \n\
             Provide: 1) Top recommendation, 2) Budget tip, 3) Must-see attraction",
            destination = context.destination,
            budget = context.budget_usd,
            duration = context.duration_days,
            interests = context.interests.join(", "),
            history = context.history.join(", "),
            weather = context.weather_summary.as_deref().unwrap_or("Not available"),
            events = context.events_summary.as_deref().unwrap_or("None found"),
            advisory = context.advisory_level.as_deref().unwrap_or("Normal"),
        )
    }

    /// Fixed three-part recommendation interpolating only the destination
    #[must_use]
    pub fn fallback(destination: &str) -> Recommendation {
        let body = format!(
            "**Travel picks for {destination}**\n\
             \n\
             **Must-visit:** Start with the signature landmarks of {destination} \
             and set aside a slow morning for its old town.\n\
             \n\
             **Budget tip:** Book accommodation two to three months ahead and \
             lean on local transport passes instead of taxis.\n\
             \n\
             **Hidden gem:** Ask locals in {destination} to point you to their \
             favourite neighbourhood market."
        );
        Recommendation { body }
    }
}

/// Chat completion request body
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Chat completion response body; only the first choice is consumed
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}
