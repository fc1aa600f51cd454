use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::ScoringRules;
use crate::services::AssistantConfig;

/// Output format of the tracing subscriber, read from `LOG_FORMAT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl LogFormat {
    /// Unknown values fall back to JSON
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Self::Pretty,
            "compact" | "text" => Self::Compact,
            _ => Self::Json,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub roster: RosterSettings,
    #[serde(default)]
    pub profile: ProfileSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub assistant: AssistantSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RosterSettings {
    /// JSON roster file; the built-in demo roster is used when unset
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileSettings {
    #[serde(default = "default_profile_path")]
    pub path: String,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            path: default_profile_path(),
        }
    }
}

fn default_profile_path() -> String { "data/user.json".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_search_delay_ms")]
    pub search_delay_ms: u64,
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            search_delay_ms: default_search_delay_ms(),
            session_ttl_secs: default_session_ttl_secs(),
            max_sessions: default_max_sessions(),
        }
    }
}

fn default_search_delay_ms() -> u64 { 500 }
fn default_session_ttl_secs() -> u64 { 3600 }
fn default_max_sessions() -> u64 { 10_000 }

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default = "default_base")]
    pub base: i32,
    #[serde(default = "default_tier_step_penalty")]
    pub tier_step_penalty: i32,
    #[serde(default = "default_region_bonus")]
    pub region_bonus: i32,
    #[serde(default = "default_role_penalty")]
    pub role_penalty: i32,
    #[serde(default = "default_cap_at_100")]
    pub cap_at_100: bool,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            base: default_base(),
            tier_step_penalty: default_tier_step_penalty(),
            region_bonus: default_region_bonus(),
            role_penalty: default_role_penalty(),
            cap_at_100: default_cap_at_100(),
        }
    }
}

impl From<&ScoringSettings> for ScoringRules {
    fn from(s: &ScoringSettings) -> Self {
        ScoringRules {
            base: s.base,
            tier_step_penalty: s.tier_step_penalty,
            region_bonus: s.region_bonus,
            role_penalty: s.role_penalty,
            cap_at_100: s.cap_at_100,
        }
    }
}

fn default_base() -> i32 { 100 }
fn default_tier_step_penalty() -> i32 { 5 }
fn default_region_bonus() -> i32 { 10 }
fn default_role_penalty() -> i32 { 15 }
fn default_cap_at_100() -> bool { true }

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantSettings {
    #[serde(default = "default_assistant_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_assistant_model")]
    pub model: String,
    pub api_key: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    #[serde(default = "default_assistant_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            endpoint: default_assistant_endpoint(),
            model: default_assistant_model(),
            api_key: None,
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            timeout_secs: default_assistant_timeout_secs(),
        }
    }
}

impl From<&AssistantSettings> for AssistantConfig {
    fn from(s: &AssistantSettings) -> Self {
        AssistantConfig {
            endpoint: s.endpoint.clone(),
            model: s.model.clone(),
            api_key: s.api_key.clone(),
            temperature: s.temperature,
            max_output_tokens: s.max_output_tokens,
            timeout_secs: s.timeout_secs,
        }
    }
}

fn default_assistant_endpoint() -> String { "https://generativelanguage.googleapis.com".to_string() }
fn default_assistant_model() -> String { "gemini-1.5-flash".to_string() }
fn default_temperature() -> f64 { 0.7 }
fn default_max_output_tokens() -> u32 { 1024 }
fn default_assistant_timeout_secs() -> u64 { 30 }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with ARENA__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., ARENA__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("ARENA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_env_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("ARENA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// The assistant key is commonly provided as plain GEMINI_API_KEY
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("GEMINI_API_KEY") {
        Ok(key) if !key.is_empty() => Config::builder()
            .add_source(settings)
            .set_override("assistant.api_key", key)?
            .build(),
        _ => Ok(settings),
    }
}
