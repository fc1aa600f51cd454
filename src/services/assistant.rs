use crate::models::{AssistantTurn, MessageRole};
use rand::Rng;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Placeholder key shipped in sample env files
const PLACEHOLDER_KEY: &str = "your_gemini_api_key_here";

/// Shown to the user when the generative-text call fails
pub const FALLBACK_REPLY: &str =
    "Sorry, I'm having trouble connecting right now. Please try again later.";

const SYSTEM_INSTRUCTION: &str = "\
You are a gaming assistant in a team-finding app called Cyber Arena Nexus. \
Your role is to help gamers connect with potential teammates. \
Keep your responses friendly, helpful, and concise (1-3 sentences). \
Focus on gaming topics, team coordination, and matchmaking. \
If asked about games, ranks, or gaming strategies, provide helpful information. \
Avoid discussing sensitive topics or providing personal information.";

const DEFAULT_REPLIES: &[&str] = &[
    "That's interesting! Tell me more about your gaming preferences so I can help you find the right teammates.",
    "I'm here to help you connect with other players. What specific qualities are you looking for in teammates?",
    "Finding the right squad is key to success. What's your preferred playstyle?",
    "Got it! Have you checked out the player profiles in your skill range?",
    "I understand. The matchmaking system can help you find players with similar goals and playstyles.",
];

/// Errors that can occur when calling the generative-text API
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Settings for the generative-text endpoint
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-1.5-flash".to_string(),
            api_key: None,
            temperature: 0.7,
            max_output_tokens: 1024,
            timeout_secs: 30,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<MessageRole>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Reply handed back to the chat panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantReply {
    pub text: String,
    pub simulated: bool,
}

/// Gaming assistant backed by the Gemini REST API
///
/// Without an API key every reply is simulated locally. Failures of the
/// remote call never surface as errors to the caller; they become
/// [`FALLBACK_REPLY`].
pub struct AssistantClient {
    config: AssistantConfig,
    client: Client,
}

impl AssistantClient {
    pub fn new(config: AssistantConfig) -> Result<Self, AssistantError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        if !has_usable_key(&config.api_key) {
            tracing::warn!("Gemini API key is not set. AI responses will be simulated.");
        }

        Ok(Self { config, client })
    }

    pub fn is_simulated(&self) -> bool {
        !has_usable_key(&self.config.api_key)
    }

    /// Answer `prompt` given the earlier turns of the conversation
    pub async fn reply(&self, prompt: &str, history: &[AssistantTurn]) -> AssistantReply {
        let api_key = match self.config.api_key.as_deref() {
            Some(key) if has_usable_key(&self.config.api_key) => key,
            _ => {
                return AssistantReply {
                    text: simulate_reply(prompt),
                    simulated: true,
                }
            }
        };

        match self.generate(api_key, prompt, history).await {
            Ok(text) => AssistantReply {
                text,
                simulated: false,
            },
            Err(e) => {
                tracing::error!("Error generating AI response: {}", e);
                AssistantReply {
                    text: FALLBACK_REPLY.to_string(),
                    simulated: false,
                }
            }
        }
    }

    async fn generate(
        &self,
        api_key: &str,
        prompt: &str,
        history: &[AssistantTurn],
    ) -> Result<String, AssistantError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        );

        let contents = history
            .iter()
            .map(|turn| Content {
                role: Some(turn.role),
                parts: vec![Part { text: &turn.content }],
            })
            .chain(std::iter::once(Content {
                role: Some(MessageRole::User),
                parts: vec![Part { text: prompt }],
            }))
            .collect();

        let request = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: SYSTEM_INSTRUCTION,
                }],
            },
            contents,
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            },
        };

        tracing::debug!("Requesting assistant reply from {} ({} history turns)", url, history.len());

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(200).collect();
            return Err(AssistantError::ApiError(format!("{}: {}", status, snippet)));
        }

        let data: GenerateContentResponse = response.json().await?;

        let text: String = data
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .ok_or_else(|| AssistantError::InvalidResponse("No candidates in response".into()))?;

        if text.trim().is_empty() {
            return Err(AssistantError::InvalidResponse("Empty reply text".into()));
        }

        Ok(text)
    }
}

fn has_usable_key(key: &Option<String>) -> bool {
    matches!(key.as_deref(), Some(k) if !k.is_empty() && k != PLACEHOLDER_KEY)
}

/// Keyword-driven stand-in used when no API key is configured
pub fn simulate_reply(prompt: &str) -> String {
    let prompt = prompt.to_lowercase();

    if prompt.contains("hello") || prompt.contains("hi") {
        return "Hey there! Ready to find some teammates for your next gaming session?".to_string();
    }

    if prompt.contains("rank") {
        return "Ranks are important for finding compatible teammates. What's your current rank and which game are you playing?".to_string();
    }

    if prompt.contains("team") {
        return "Finding the right teammates can make all the difference! What roles are you looking to fill in your team?".to_string();
    }

    if prompt.contains("game") || prompt.contains("play") {
        return "We support many popular competitive games like Valorant, League of Legends, CS:GO, and more. Which one are you interested in?".to_string();
    }

    let idx = rand::rng().random_range(0..DEFAULT_REPLIES.len());
    DEFAULT_REPLIES[idx].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(endpoint: &str, api_key: Option<&str>) -> AssistantConfig {
        AssistantConfig {
            endpoint: endpoint.to_string(),
            api_key: api_key.map(str::to_string),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    #[test]
    fn test_simulated_keyword_rules() {
        assert!(simulate_reply("Hello!").starts_with("Hey there"));
        assert!(simulate_reply("what RANK should I be").starts_with("Ranks are important"));
        assert!(simulate_reply("need a squad, any teammate?").starts_with("Finding the right teammates"));
        assert!(simulate_reply("what games are supported").starts_with("We support"));
    }

    #[test]
    fn test_simulated_default_reply() {
        let reply = simulate_reply("xyz");
        assert!(DEFAULT_REPLIES.contains(&reply.as_str()));
    }

    #[test]
    fn test_placeholder_key_is_unusable() {
        assert!(!has_usable_key(&None));
        assert!(!has_usable_key(&Some(String::new())));
        assert!(!has_usable_key(&Some(PLACEHOLDER_KEY.to_string())));
        assert!(has_usable_key(&Some("abc".to_string())));
    }

    #[tokio::test]
    async fn test_reply_without_key_is_simulated() {
        let client = AssistantClient::new(config_for("http://127.0.0.1:9", None)).unwrap();
        let reply = client.reply("hello", &[]).await;

        assert!(reply.simulated);
        assert!(client.is_simulated());
    }

    #[tokio::test]
    async fn test_reply_from_api() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"generationConfig":{"temperature":0.7,"maxOutputTokens":1024}}"#.to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Try duo queue tonight."}]}}]}"#)
            .create_async()
            .await;

        let client = AssistantClient::new(config_for(&server.url(), Some("test-key"))).unwrap();
        let history = vec![AssistantTurn {
            role: MessageRole::User,
            content: "I main support".to_string(),
        }];
        let reply = client.reply("Who should I queue with?", &history).await;

        mock.assert_async().await;
        assert_eq!(reply.text, "Try duo queue tonight.");
        assert!(!reply.simulated);
    }

    #[tokio::test]
    async fn test_api_failure_degrades_to_fallback() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = AssistantClient::new(config_for(&server.url(), Some("test-key"))).unwrap();
        let reply = client.reply("hello", &[]).await;

        assert_eq!(reply.text, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_empty_candidates_degrade_to_fallback() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let client = AssistantClient::new(config_for(&server.url(), Some("test-key"))).unwrap();
        let reply = client.reply("hello", &[]).await;

        assert_eq!(reply.text, FALLBACK_REPLY);
    }
}
