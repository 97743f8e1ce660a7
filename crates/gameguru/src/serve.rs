// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `gameguru serve`: wires catalog, completion provider, assistant and
//! session registry into the HTTP gateway and runs until a shutdown signal.

use std::sync::{Arc, RwLock};

use gameguru_agent::{Assistant, SessionRegistry};
use gameguru_catalog::Catalog;
use gameguru_config::GameGuruConfig;
use gameguru_core::{CompletionAdapter, GameGuruError};
use gameguru_gateway::{start_server, GatewayState};
use gameguru_openai::{resolve_api_key, OpenAiProvider, API_KEY_ENV};
use gameguru_security::RedactingWriter;
use secrecy::ExposeSecret;
use tracing::{info, warn};

/// Runs the gateway until SIGINT or SIGTERM.
pub async fn run_serve(config: GameGuruConfig) -> Result<(), GameGuruError> {
    let api_key = resolve_api_key(&config.openai.api_key, std::env::var(API_KEY_ENV).ok())?;

    let secrets = Arc::new(RwLock::new(Vec::new()));
    RedactingWriter::<std::io::Stderr>::add_secret(&secrets, api_key.expose_secret().to_string());
    init_tracing(&config.agent.log_level, secrets);

    info!(name = %config.agent.name, "starting gameguru serve");

    let catalog = Arc::new(Catalog::builtin()?);
    info!(games = catalog.len(), "catalog loaded");

    let provider: Arc<dyn CompletionAdapter> =
        Arc::new(OpenAiProvider::with_key(&config.openai, api_key)?);
    let assistant = Arc::new(
        Assistant::from_config(&config, Arc::clone(&provider), catalog).await?,
    );
    let registry = Arc::new(SessionRegistry::new(assistant, &config.agent));
    let state = GatewayState::new(registry, config.gateway.port);

    start_server(&config.gateway, state, shutdown_signal()).await?;

    if let Err(e) = provider.shutdown().await {
        warn!(error = %e, "provider shutdown failed");
    }
    info!("gameguru serve shutdown complete");
    Ok(())
}

/// Resolves on SIGINT (Ctrl+C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT (Ctrl+C), initiating shutdown"),
        _ = terminate => info!("received SIGTERM, initiating shutdown"),
    }
}

/// Initializes the tracing subscriber. Output passes through a redacting
/// writer so the API key never reaches the terminal.
fn init_tracing(log_level: &str, secrets: Arc<RwLock<Vec<String>>>) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gameguru={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(move || RedactingWriter::new(std::io::stderr(), Arc::clone(&secrets)))
        .init();
}
