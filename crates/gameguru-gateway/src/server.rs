// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use gameguru_agent::SessionRegistry;
use gameguru_config::model::GatewayConfig;
use gameguru_core::GameGuruError;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::handlers;
use crate::sessions;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Live sessions; also the route to the shared assistant and catalog.
    pub registry: Arc<SessionRegistry>,
    /// Port reported by the health endpoint.
    pub port: u16,
    /// Process start time for uptime calculation.
    pub start_time: Instant,
}

impl GatewayState {
    pub fn new(registry: Arc<SessionRegistry>, port: u16) -> Self {
        Self {
            registry,
            port,
            start_time: Instant::now(),
        }
    }
}

/// Builds the full application router.
///
/// - GET / and GET /api/health
/// - POST /api/chat (stateless proxy)
/// - /v1/sessions/* (stateful sessions)
/// - /v1/games, /v1/games/{id}, /v1/categories (catalog lookup)
pub fn router(state: GatewayState, cors_origins: &[String]) -> Router {
    let api_routes = Router::new()
        .route("/", get(handlers::get_root))
        .route("/api/health", get(handlers::get_health))
        .route("/api/chat", post(handlers::post_chat));

    let session_routes = Router::new()
        .route("/v1/sessions", post(sessions::start_session))
        .route(
            "/v1/sessions/{id}",
            get(sessions::get_session).delete(sessions::end_session),
        )
        .route("/v1/sessions/{id}/messages", post(sessions::submit_message))
        .route("/v1/sessions/{id}/error", delete(sessions::dismiss_error))
        .route("/v1/sessions/{id}/reset", post(sessions::reset_session));

    let catalog_routes = Router::new()
        .route("/v1/games", get(handlers::list_games))
        .route("/v1/games/{id}", get(handlers::get_game))
        .route("/v1/categories", get(handlers::list_categories));

    Router::new()
        .merge(api_routes)
        .merge(session_routes)
        .merge(catalog_routes)
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// Allows the listed origins, or any origin when the list is empty.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin = %origin, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// Start the gateway HTTP server and serve until `shutdown` resolves.
pub async fn start_server(
    config: &GatewayConfig,
    state: GatewayState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), GameGuruError> {
    let app = router(state, &config.cors_origins);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| GameGuruError::Gateway {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| GameGuruError::Gateway {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    info!("Gateway server stopped");
    Ok(())
}
