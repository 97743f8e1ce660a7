// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Maps domain errors onto HTTP status codes and the JSON error body.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gameguru_agent::RejectReason;
use gameguru_core::{CompletionFailure, FailureKind, GameGuruError};
use tracing::error;

use crate::dto::ErrorResponse;

/// An error ready to be rendered as a response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    kind: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            kind: None,
        }
    }

    pub fn with_kind(mut self, kind: impl ToString) -> Self {
        self.kind = Some(kind.to_string());
        self
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, what)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<RejectReason> for ApiError {
    fn from(reason: RejectReason) -> Self {
        let (status, message) = match reason {
            RejectReason::Blank => (StatusCode::UNPROCESSABLE_ENTITY, "message text is blank"),
            RejectReason::Busy => (
                StatusCode::CONFLICT,
                "a reply is still pending for this session",
            ),
        };
        Self::new(status, message).with_kind(reason)
    }
}

impl From<CompletionFailure> for ApiError {
    fn from(failure: CompletionFailure) -> Self {
        let kind = failure.kind();
        let status = match kind {
            FailureKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::BAD_GATEWAY,
        };
        Self::new(status, kind.user_message()).with_kind(kind)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text()).with_kind("invalid_body")
    }
}

impl From<GameGuruError> for ApiError {
    fn from(err: GameGuruError) -> Self {
        match err {
            GameGuruError::SessionNotFound { .. } => Self::not_found(err.to_string()),
            GameGuruError::Capacity { .. } => {
                Self::new(StatusCode::SERVICE_UNAVAILABLE, err.to_string()).with_kind("capacity")
            }
            other => {
                error!(error = %other, "request failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message,
            kind: self.kind,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        (self.status, Json(body)).into_response()
    }
}
