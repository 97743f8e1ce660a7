// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for GameGuru.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level GameGuru configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GameGuruConfig {
    /// Assistant identity and conversation behavior.
    #[serde(default)]
    pub agent: AgentConfig,

    /// OpenAI-compatible completion endpoint settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// HTTP gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Canned reply used when a completion fails.
    #[serde(default)]
    pub fallback: FallbackConfig,
}

/// Assistant identity and conversation behavior.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the assistant.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Maximum number of live chat sessions.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Number of most recent log messages sent with each completion request.
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// Inline system prompt string. Overridden by `system_prompt_file` if both set.
    #[serde(default)]
    pub system_prompt: Option<String>,

    /// Path to a file containing the system prompt.
    /// Takes precedence over `system_prompt` if both are set.
    #[serde(default)]
    pub system_prompt_file: Option<String>,

    /// Greeting that opens every new session.
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Greeting that opens a session after the user clears the chat.
    #[serde(default = "default_cleared_greeting")]
    pub cleared_greeting: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            max_sessions: default_max_sessions(),
            history_window: default_history_window(),
            system_prompt: None,
            system_prompt_file: None,
            greeting: default_greeting(),
            cleared_greeting: default_cleared_greeting(),
        }
    }
}

fn default_agent_name() -> String {
    "Game Guru".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_sessions() -> usize {
    256
}

fn default_history_window() -> usize {
    10
}

fn default_greeting() -> String {
    "Hello! I'm your AI-powered Game Guru! I can help you find the perfect board game \
     based on your preferences, group size, time constraints, and more. What kind of \
     gaming experience are you looking for today?"
        .to_string()
}

fn default_cleared_greeting() -> String {
    "Chat cleared! I'm ready to help you discover your next favorite board game. \
     What would you like to play?"
        .to_string()
}

/// OpenAI-compatible completion endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key. `None` requires the `OPENAI_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL; `/chat/completions` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens to generate per reply.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature (0.0 - 2.0).
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Presence penalty (-2.0 - 2.0).
    #[serde(default = "default_penalty")]
    pub presence_penalty: f32,

    /// Frequency penalty (-2.0 - 2.0).
    #[serde(default = "default_penalty")]
    pub frequency_penalty: f32,

    /// Seconds to wait for a reply before reporting a timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            presence_penalty: default_penalty(),
            frequency_penalty: default_penalty(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_tokens() -> u32 {
    800
}

fn default_temperature() -> f32 {
    0.7
}

fn default_penalty() -> f32 {
    0.1
}

fn default_timeout_secs() -> u64 {
    30
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins. Empty allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
        "http://localhost:5174".to_string(),
    ]
}

/// Canned reply used when a completion fails.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FallbackConfig {
    /// Apology text shown instead of the model reply.
    #[serde(default = "default_fallback_message")]
    pub message: String,

    /// Catalog ids recommended alongside the apology, in display order.
    #[serde(default = "default_shortlist")]
    pub shortlist: Vec<String>,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            message: default_fallback_message(),
            shortlist: default_shortlist(),
        }
    }
}

fn default_fallback_message() -> String {
    "I'm having trouble connecting to my AI brain right now. Let me give you some popular \
     recommendations while I recover: Ticket to Ride for families, Azul for strategy lovers, \
     and Codenames for parties!"
        .to_string()
}

/// Ticket to Ride, Azul, Codenames.
fn default_shortlist() -> Vec<String> {
    vec!["4".to_string(), "5".to_string(), "24".to_string()]
}
