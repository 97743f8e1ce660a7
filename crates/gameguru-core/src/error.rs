// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for GameGuru.
//!
//! [`CompletionFailure`] is the classified outcome of a failed completion call.
//! It is surfaced to the UI layer rather than swallowed, so every variant maps
//! to a distinct user-facing message and remediation hint.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// The primary error type used across GameGuru crates.
#[derive(Debug, Error)]
pub enum GameGuruError {
    /// Configuration errors (invalid TOML, missing credentials, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// The catalog dataset violates an invariant (duplicate ids, empty names).
    #[error("catalog error: {0}")]
    Catalog(String),

    /// No live session exists with the given id.
    #[error("session not found: {id}")]
    SessionNotFound { id: String },

    /// The session registry is full.
    #[error("session capacity reached ({max} live sessions)")]
    Capacity { max: usize },

    /// HTTP gateway errors (bind failure, server crash).
    #[error("gateway error: {message}")]
    Gateway {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

/// The kind of a completion failure, without any detail payload.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FailureKind {
    Unauthorized,
    RateLimited,
    QuotaExceeded,
    ServerUnavailable,
    Timeout,
    NetworkError,
    MalformedResponse,
    UnknownError,
}

/// What the user can do about a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Remediation {
    /// The local network or the route to the remote service is the problem.
    CheckConnectivity,
    /// The service operator must fix credentials or billing.
    CheckConfiguration,
    /// The remote side is struggling; a later attempt may succeed.
    TryAgainLater,
}

impl FailureKind {
    /// Returns the user-facing message for this failure category.
    pub fn user_message(&self) -> &'static str {
        match self {
            FailureKind::Unauthorized => {
                "Invalid API key. Please check the OpenAI API key configuration."
            }
            FailureKind::RateLimited => {
                "Rate limit reached. Please wait a moment before trying again."
            }
            FailureKind::QuotaExceeded => {
                "The OpenAI account has insufficient credits. Please check the billing settings."
            }
            FailureKind::ServerUnavailable => {
                "OpenAI servers are experiencing issues. Please try again later."
            }
            FailureKind::Timeout => "Request timeout. Please try again.",
            FailureKind::NetworkError => {
                "Network error connecting to OpenAI. Please check your internet connection."
            }
            FailureKind::MalformedResponse => "Invalid response from the AI service.",
            FailureKind::UnknownError => "Failed to get AI response. Please try again.",
        }
    }

    /// Returns the remediation class for this failure category.
    pub fn remediation(&self) -> Remediation {
        match self {
            FailureKind::NetworkError | FailureKind::Timeout => Remediation::CheckConnectivity,
            FailureKind::Unauthorized | FailureKind::QuotaExceeded => {
                Remediation::CheckConfiguration
            }
            FailureKind::RateLimited
            | FailureKind::ServerUnavailable
            | FailureKind::MalformedResponse
            | FailureKind::UnknownError => Remediation::TryAgainLater,
        }
    }
}

/// A classified completion failure.
///
/// Detail strings come from the remote error body or the transport error and
/// never contain credentials.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionFailure {
    /// HTTP 401: the credential was rejected.
    #[error("unauthorized: {detail}")]
    Unauthorized { detail: String },

    /// HTTP 429: too many requests.
    #[error("rate limited: {detail}")]
    RateLimited { detail: String },

    /// HTTP 402, or a 429 carrying `insufficient_quota`.
    #[error("quota exceeded: {detail}")]
    QuotaExceeded { detail: String },

    /// HTTP 5xx.
    #[error("server unavailable ({status}): {detail}")]
    ServerUnavailable { status: u16, detail: String },

    /// No response within the configured deadline.
    #[error("no response after {after:?}")]
    Timeout { after: Duration },

    /// DNS, connect, TLS or connection-reset failures.
    #[error("network error: {detail}")]
    NetworkError { detail: String },

    /// A 2xx response without the generated text.
    #[error("malformed response: {detail}")]
    MalformedResponse { detail: String },

    /// Any other non-2xx status.
    #[error("unexpected status {status}: {detail}")]
    UnknownError { status: u16, detail: String },
}

impl CompletionFailure {
    /// Returns the kind of this failure.
    pub fn kind(&self) -> FailureKind {
        match self {
            CompletionFailure::Unauthorized { .. } => FailureKind::Unauthorized,
            CompletionFailure::RateLimited { .. } => FailureKind::RateLimited,
            CompletionFailure::QuotaExceeded { .. } => FailureKind::QuotaExceeded,
            CompletionFailure::ServerUnavailable { .. } => FailureKind::ServerUnavailable,
            CompletionFailure::Timeout { .. } => FailureKind::Timeout,
            CompletionFailure::NetworkError { .. } => FailureKind::NetworkError,
            CompletionFailure::MalformedResponse { .. } => FailureKind::MalformedResponse,
            CompletionFailure::UnknownError { .. } => FailureKind::UnknownError,
        }
    }

    /// Builds a detail-free failure of the given kind. Used by test doubles.
    pub fn from_kind(kind: FailureKind) -> Self {
        let detail = String::new();
        match kind {
            FailureKind::Unauthorized => CompletionFailure::Unauthorized { detail },
            FailureKind::RateLimited => CompletionFailure::RateLimited { detail },
            FailureKind::QuotaExceeded => CompletionFailure::QuotaExceeded { detail },
            FailureKind::ServerUnavailable => CompletionFailure::ServerUnavailable {
                status: 503,
                detail,
            },
            FailureKind::Timeout => CompletionFailure::Timeout {
                after: Duration::from_secs(30),
            },
            FailureKind::NetworkError => CompletionFailure::NetworkError { detail },
            FailureKind::MalformedResponse => CompletionFailure::MalformedResponse { detail },
            FailureKind::UnknownError => CompletionFailure::UnknownError {
                status: 418,
                detail,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [FailureKind; 8] = [
        FailureKind::Unauthorized,
        FailureKind::RateLimited,
        FailureKind::QuotaExceeded,
        FailureKind::ServerUnavailable,
        FailureKind::Timeout,
        FailureKind::NetworkError,
        FailureKind::MalformedResponse,
        FailureKind::UnknownError,
    ];

    #[test]
    fn every_kind_has_a_distinct_user_message() {
        let mut seen = std::collections::HashSet::new();
        for kind in ALL_KINDS {
            assert!(seen.insert(kind.user_message()), "duplicate message for {kind}");
        }
    }

    #[test]
    fn transport_failures_suggest_connectivity() {
        assert_eq!(
            FailureKind::NetworkError.remediation(),
            Remediation::CheckConnectivity
        );
        assert_eq!(FailureKind::Timeout.remediation(), Remediation::CheckConnectivity);
        assert_eq!(
            FailureKind::ServerUnavailable.remediation(),
            Remediation::TryAgainLater
        );
        assert_eq!(
            FailureKind::Unauthorized.remediation(),
            Remediation::CheckConfiguration
        );
    }

    #[test]
    fn from_kind_round_trips_through_kind() {
        for kind in ALL_KINDS {
            assert_eq!(CompletionFailure::from_kind(kind).kind(), kind);
        }
    }

    #[test]
    fn failure_kind_serializes_snake_case() {
        let json = serde_json::to_string(&FailureKind::QuotaExceeded).unwrap();
        assert_eq!(json, "\"quota_exceeded\"");
        assert_eq!(FailureKind::RateLimited.to_string(), "rate_limited");
    }
}
