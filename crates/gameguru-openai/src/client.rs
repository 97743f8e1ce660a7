// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI chat-completions API.
//!
//! [`OpenAiClient`] sends exactly one request per call, bounds it with a
//! deadline, and turns every failure into a classified [`CompletionFailure`].

use std::time::Duration;

use gameguru_core::{CompletionFailure, GameGuruError};
use gameguru_security::redact;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse};

/// Error code OpenAI attaches to a 429 when the account is out of credit.
const INSUFFICIENT_QUOTA: &str = "insufficient_quota";

/// HTTP client for chat completions.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
    api_key: SecretString,
}

impl OpenAiClient {
    /// Creates a client for `{base_url}/chat/completions`.
    pub fn new(
        api_key: SecretString,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, GameGuruError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
            .map_err(|_| {
                GameGuruError::Config("API key contains characters not allowed in a header".into())
            })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| GameGuruError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            timeout,
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sends one request. Never retries.
    pub async fn chat(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, CompletionFailure> {
        match tokio::time::timeout(self.timeout, self.send(request)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(after = ?self.timeout, "completion request timed out");
                Err(CompletionFailure::Timeout {
                    after: self.timeout,
                })
            }
        }
    }

    async fn send(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, CompletionFailure> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_failure(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_failure(e))?;
        debug!(status = %status, bytes = body.len(), "completion response received");

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| {
                warn!(error = %e, "completion body is not valid JSON");
                CompletionFailure::MalformedResponse {
                    detail: format!("invalid JSON: {e}"),
                }
            });
        }

        let failure = classify_status(status, &self.redacted(&body));
        warn!(status = %status, kind = %failure.kind(), detail = %failure, "completion request failed");
        Err(failure)
    }

    fn transport_failure(&self, err: reqwest::Error) -> CompletionFailure {
        let detail = self.redacted(&err.to_string());
        warn!(error = %detail, "completion transport error");
        if err.is_timeout() {
            CompletionFailure::Timeout {
                after: self.timeout,
            }
        } else {
            CompletionFailure::NetworkError { detail }
        }
    }

    fn redacted(&self, text: &str) -> String {
        redact(text, &[self.api_key.expose_secret().to_string()])
    }
}

/// Maps a non-2xx status and its (already redacted) body to a failure.
pub fn classify_status(status: StatusCode, body: &str) -> CompletionFailure {
    let api_error = serde_json::from_str::<ApiErrorResponse>(body).ok();
    let detail = api_error
        .as_ref()
        .map(|e| e.error.message.clone())
        .unwrap_or_else(|| body.chars().take(200).collect());
    let quota_code = api_error.as_ref().is_some_and(|e| {
        e.error.code.as_deref() == Some(INSUFFICIENT_QUOTA)
            || e.error.type_.as_deref() == Some(INSUFFICIENT_QUOTA)
    });

    match status.as_u16() {
        401 => CompletionFailure::Unauthorized { detail },
        402 => CompletionFailure::QuotaExceeded { detail },
        429 if quota_code => CompletionFailure::QuotaExceeded { detail },
        429 => CompletionFailure::RateLimited { detail },
        code @ 500..=599 => CompletionFailure::ServerUnavailable {
            status: code,
            detail,
        },
        code => CompletionFailure::UnknownError {
            status: code,
            detail,
        },
    }
}
