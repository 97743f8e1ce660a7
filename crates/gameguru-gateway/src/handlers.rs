// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the service banner, health, the stateless chat
//! proxy and catalog lookup.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use gameguru_catalog::GameFilter;
use gameguru_core::{ChatTurn, GameRecord, Role};
use tracing::{debug, info};

use crate::dto::{BannerResponse, ChatRequest, ChatResponse, GameCard, GamesQuery, HealthResponse};
use crate::error::ApiError;
use crate::server::GatewayState;

/// GET /
pub async fn get_root() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: "GameGuru board game assistant is running".to_string(),
        endpoints: vec![
            "GET /api/health",
            "POST /api/chat",
            "POST /v1/sessions",
            "GET /v1/sessions/{id}",
            "POST /v1/sessions/{id}/messages",
            "DELETE /v1/sessions/{id}/error",
            "POST /v1/sessions/{id}/reset",
            "DELETE /v1/sessions/{id}",
            "GET /v1/games",
            "GET /v1/games/{id}",
            "GET /v1/categories",
        ],
    })
}

/// GET /api/health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    let assistant = state.registry.assistant();
    let openai_configured = assistant
        .provider()
        .health_check()
        .await
        .is_ok_and(|status| status.is_healthy());
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        port: state.port,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        openai_configured,
        catalog_size: assistant.catalog().len(),
    })
}

/// POST /api/chat
///
/// One stateless turn: the caller owns the history. A history that is not an
/// array is ignored; entries without a string `content` or with a role other
/// than `user`/`assistant` are dropped.
pub async fn post_chat(
    State(state): State<GatewayState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(body) = payload?;
    let message = body
        .message
        .as_ref()
        .and_then(|m| m.as_str())
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ApiError::new(StatusCode::BAD_REQUEST, "Valid message is required"))?;

    let entries = body
        .conversation_history
        .as_ref()
        .and_then(serde_json::Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let history = valid_history(entries);
    debug!(history = history.len(), chars = message.len(), "chat proxy request");

    let reply = state.registry.assistant().reply(&history, message).await?;
    info!(games = reply.recommended_games.len(), "chat proxy reply");
    Ok(Json(ChatResponse {
        response: reply.text,
        timestamp: reply.timestamp.to_rfc3339(),
        recommended_games: reply
            .recommended_games
            .iter()
            .map(|g| GameCard::from(g.as_ref()))
            .collect(),
    }))
}

fn valid_history(entries: &[serde_json::Value]) -> Vec<ChatTurn> {
    entries
        .iter()
        .filter_map(|entry| {
            let role = match entry.get("role")?.as_str()? {
                "user" => Role::User,
                "assistant" => Role::Assistant,
                _ => return None,
            };
            let content = entry.get("content")?.as_str()?;
            (!content.trim().is_empty()).then(|| ChatTurn {
                role,
                content: content.to_string(),
            })
        })
        .collect()
}

/// GET /v1/games
pub async fn list_games(
    State(state): State<GatewayState>,
    Query(query): Query<GamesQuery>,
) -> Json<Vec<GameRecord>> {
    let catalog = state.registry.assistant().catalog();
    let filter = GameFilter {
        players: query.players,
        max_difficulty: query.max_difficulty,
        max_learning_curve: query.max_learning_curve,
        categories: query.category.into_iter().collect(),
    };
    let games = catalog
        .search(query.q.as_deref().unwrap_or_default())
        .into_iter()
        .filter(|g| filter.matches(g))
        .map(|g| GameRecord::clone(&g))
        .collect();
    Json(games)
}

/// GET /v1/games/{id}
pub async fn get_game(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<Json<GameRecord>, ApiError> {
    state
        .registry
        .assistant()
        .catalog()
        .find_by_id(&id)
        .map(|g| Json(GameRecord::clone(&g)))
        .ok_or_else(|| ApiError::not_found(format!("game not found: {id}")))
}

/// GET /v1/categories
pub async fn list_categories(State(state): State<GatewayState>) -> Json<Vec<String>> {
    Json(state.registry.assistant().catalog().categories())
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::not_found("Endpoint not found")
}
