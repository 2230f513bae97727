//! Async HTTP client for the lore gateway
//!
//! Model-agnostic client for an Anthropic-style messages API. The prompts
//! demand bare JSON matching our structured types; anything else falls back
//! to the deterministic local content. Callers debit costs before the call
//! and never roll back — narrative failure still consumes the resource.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};
use crate::core::types::{Element, Stats};
use crate::lore::{fallback, CreatureLore, ExplorationEvent};
use crate::map::Biome;

/// Async lore client for making gateway calls
pub struct LoreClient {
    client: Client,
    api_key: String,
    api_url: String,
    model: String,
}

impl LoreClient {
    /// Create a new client with explicit configuration
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_url,
            model,
        }
    }

    /// Create a client from environment variables
    ///
    /// Required: LORE_API_KEY
    /// Optional: LORE_API_URL (defaults to Anthropic API)
    /// Optional: LORE_MODEL (defaults to claude-3-haiku-20240307)
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("LORE_API_KEY")
            .map_err(|_| GameError::LoreError("LORE_API_KEY not set".into()))?;
        let api_url = std::env::var("LORE_API_URL")
            .unwrap_or_else(|_| "https://api.anthropic.com/v1/messages".into());
        let model =
            std::env::var("LORE_MODEL").unwrap_or_else(|_| "claude-3-haiku-20240307".into());

        Ok(Self::new(api_key, api_url, model))
    }

    /// Describe a freshly synthesized creature. Never fails: any gateway
    /// problem yields the deterministic element-templated fallback.
    pub async fn describe_creature(&self, element: Element, stats: &Stats) -> CreatureLore {
        let dominant = dominant_stat(stats);
        let system = "You generate creature lore for a sci-fi monster-breeding game. \
                      Respond with a single JSON object and nothing else, shaped as \
                      {\"name\": string, \"description\": string, \"traits\": [string], \
                      \"anatomy\": {\"trunk\": string, \"head\": string, \"appendages\": [string]}}. \
                      Two short traits; one or two appendages; the anatomy should reflect the element.";
        let user = format!(
            "Element: {element}. Strongest stat: {dominant}. \
             Give the creature a unique name and a two-sentence description."
        );

        match self.complete(system, &user).await {
            Ok(text) => match parse_json_payload::<CreatureLore>(&text) {
                Ok(lore) => lore,
                Err(e) => {
                    tracing::warn!("lore gateway returned unparseable creature: {e}");
                    fallback::creature_fallback(element)
                }
            },
            Err(e) => {
                tracing::warn!("lore gateway unavailable: {e}");
                fallback::creature_fallback(element)
            }
        }
    }

    /// Narrate an exploration event. Never fails: falls back to a neutral
    /// no-reward report.
    pub async fn exploration_event(
        &self,
        faction_name: &str,
        biomes: &[Biome],
    ) -> ExplorationEvent {
        let biome_list = biomes
            .iter()
            .map(|b| b.label())
            .collect::<Vec<_>>()
            .join(" and ");
        let system = "You generate one-sentence atmospheric exploration events for a sci-fi \
                      strategy game. Respond with a single JSON object and nothing else, shaped \
                      as {\"message\": string, \"reward_type\": \"credits\"|\"biomass\"|\"mana\"|\"none\", \
                      \"amount\": number}. Amounts run 20-150.";
        let user = format!(
            "The faction {faction_name} surveys an unexplored sector of {biome_list} terrain."
        );

        match self.complete(system, &user).await {
            Ok(text) => match parse_json_payload::<ExplorationEvent>(&text) {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!("lore gateway returned unparseable event: {e}");
                    fallback::exploration_fallback()
                }
            },
            Err(e) => {
                tracing::warn!("lore gateway unavailable: {e}");
                fallback::exploration_fallback()
            }
        }
    }

    /// Send a completion request to the gateway
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: 1024,
            system: system.into(),
            messages: vec![Message {
                role: "user".into(),
                content: user.into(),
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| GameError::LoreError(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GameError::LoreError(format!("API error: {error_text}")));
        }

        let completion: MessagesResponse = response
            .json()
            .await
            .map_err(|e| GameError::LoreError(e.to_string()))?;

        completion
            .content
            .first()
            .map(|c| c.text.clone())
            .ok_or_else(|| GameError::LoreError("Empty response".into()))
    }
}

/// The dominant stat name, used to steer generated descriptions.
fn dominant_stat(stats: &Stats) -> &'static str {
    use crate::core::types::StatKind;
    StatKind::ALL
        .into_iter()
        .max_by(|a, b| stats.get(*a).total_cmp(&stats.get(*b)))
        .map_or("attack", StatKind::label)
}

/// Extract and parse the JSON object from a model reply, tolerating code
/// fences and prose around it.
fn parse_json_payload<T: serde::de::DeserializeOwned>(text: &str) -> Result<T> {
    let start = text.find('{');
    let end = text.rfind('}');
    let payload = match (start, end) {
        (Some(s), Some(e)) if e >= s => &text[s..=e],
        _ => text,
    };
    Ok(serde_json::from_str(payload)?)
}

// Messages API format
#[derive(Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}
