// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI chat-completions adapter for GameGuru.
//!
//! Implements [`CompletionAdapter`] against `POST {base_url}/chat/completions`.
//! Calls are single-shot and deadline-bounded; failures come back classified.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use gameguru_config::model::OpenAiConfig;
use gameguru_core::{
    AdapterType, CompletionAdapter, CompletionFailure, CompletionRequest, CompletionResponse,
    GameGuruError, HealthStatus, PluginAdapter, TokenUsage,
};
use secrecy::SecretString;
use tracing::{debug, info};

use crate::client::OpenAiClient;
use crate::types::ChatCompletionRequest;

/// Environment variable consulted when the config has no API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Sampling parameters sent with every request.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingParams {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub presence_penalty: f32,
    pub frequency_penalty: f32,
}

impl From<&OpenAiConfig> for SamplingParams {
    fn from(config: &OpenAiConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            presence_penalty: config.presence_penalty,
            frequency_penalty: config.frequency_penalty,
        }
    }
}

/// OpenAI provider implementing [`CompletionAdapter`].
///
/// API key resolution order: config -> `OPENAI_API_KEY` env var -> error.
pub struct OpenAiProvider {
    client: OpenAiClient,
    params: SamplingParams,
}

impl OpenAiProvider {
    /// Creates a provider from configuration, reading the key from the
    /// environment when the config leaves it unset.
    pub fn new(config: &OpenAiConfig) -> Result<Self, GameGuruError> {
        let api_key = resolve_api_key(&config.api_key, std::env::var(API_KEY_ENV).ok())?;
        Self::with_key(config, api_key)
    }

    /// Creates a provider with an explicit key.
    pub fn with_key(config: &OpenAiConfig, api_key: SecretString) -> Result<Self, GameGuruError> {
        gameguru_security::validate_url(&config.base_url)?;
        let client = OpenAiClient::new(
            api_key,
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
        )?;
        info!(
            model = %config.model,
            endpoint = client.endpoint(),
            "OpenAI provider initialized"
        );
        Ok(Self {
            client,
            params: SamplingParams::from(config),
        })
    }

    pub fn params(&self) -> &SamplingParams {
        &self.params
    }

    fn to_chat_request(&self, request: &CompletionRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.params.model.clone(),
            messages: request.messages(),
            max_tokens: self.params.max_tokens,
            temperature: self.params.temperature,
            presence_penalty: self.params.presence_penalty,
            frequency_penalty: self.params.frequency_penalty,
        }
    }
}

#[async_trait]
impl PluginAdapter for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Completion
    }

    async fn health_check(&self) -> Result<HealthStatus, GameGuruError> {
        // A probe request would spend tokens; a built client with a key is healthy.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), GameGuruError> {
        debug!("OpenAI provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl CompletionAdapter for OpenAiProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionFailure> {
        let chat_request = self.to_chat_request(&request);
        debug!(
            messages = chat_request.messages.len(),
            model = %chat_request.model,
            "sending completion request"
        );
        let response = self.client.chat(&chat_request).await?;

        let text = response
            .first_text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| CompletionFailure::MalformedResponse {
                detail: "response has no choices[0].message.content".into(),
            })?
            .to_string();

        Ok(CompletionResponse {
            id: response.id.clone(),
            text,
            model: response.model.clone(),
            finish_reason: response.first_finish_reason().map(str::to_string),
            usage: response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
            }),
        })
    }
}

/// Picks the configured key, else the environment value; blanks count as unset.
pub fn resolve_api_key(
    config_key: &Option<String>,
    env_key: Option<String>,
) -> Result<SecretString, GameGuruError> {
    config_key
        .as_ref()
        .filter(|k| !k.trim().is_empty())
        .cloned()
        .or_else(|| env_key.filter(|k| !k.trim().is_empty()))
        .map(SecretString::from)
        .ok_or_else(|| {
            GameGuruError::Config(format!(
                "OpenAI API key not found. Set openai.api_key in config or the {API_KEY_ENV} environment variable."
            ))
        })
}
