// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Handlers for `/v1/sessions`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use gameguru_agent::SubmitOutcome;
use gameguru_core::SessionId;

use crate::dto::{MessageView, SessionView, SubmitRequest, SubmitResponse, TurnOutcome};
use crate::error::ApiError;
use crate::server::GatewayState;

/// POST /v1/sessions
pub async fn start_session(
    State(state): State<GatewayState>,
) -> Result<(StatusCode, Json<SessionView>), ApiError> {
    let session = state.registry.start_session()?;
    Ok((StatusCode::CREATED, Json(SessionView::capture(&session).await)))
}

/// GET /v1/sessions/{id}
pub async fn get_session(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
    let session = state.registry.get(&SessionId(id))?;
    Ok(Json(SessionView::capture(&session).await))
}

/// POST /v1/sessions/{id}/messages
///
/// Holds the request open until the turn finishes. A failed model call is
/// still a 200: the fallback reply is appended and the banner is set.
pub async fn submit_message(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let Json(body) = payload?;
    let session = state.registry.get(&SessionId(id))?;
    let (outcome, message) = match session.submit(&body.text).await {
        SubmitOutcome::Replied(message) => (TurnOutcome::Replied, message),
        SubmitOutcome::FellBack { message, .. } => (TurnOutcome::FellBack, message),
        SubmitOutcome::Rejected(reason) => return Err(reason.into()),
    };
    Ok(Json(SubmitResponse {
        outcome,
        message: MessageView::from(&message),
        session: SessionView::capture(&session).await,
    }))
}

/// DELETE /v1/sessions/{id}/error
pub async fn dismiss_error(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
    let session = state.registry.get(&SessionId(id))?;
    session.dismiss_error().await;
    Ok(Json(SessionView::capture(&session).await))
}

/// POST /v1/sessions/{id}/reset
pub async fn reset_session(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
    let session = state.registry.reset_session(&SessionId(id))?;
    Ok(Json(SessionView::capture(&session).await))
}

/// DELETE /v1/sessions/{id}
pub async fn end_session(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.registry.end_session(&SessionId(id))?;
    Ok(StatusCode::NO_CONTENT)
}
