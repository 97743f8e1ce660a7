// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The canned reply shown when a completion fails.

use std::sync::Arc;

use gameguru_catalog::Catalog;
use gameguru_config::model::FallbackConfig;
use gameguru_core::{ConversationMessage, GameGuruError, GameRecord};

/// Apology text plus a fixed shortlist, resolved against the catalog once.
#[derive(Debug, Clone)]
pub struct FallbackReply {
    message: String,
    games: Vec<Arc<GameRecord>>,
}

impl FallbackReply {
    /// Resolves the configured shortlist ids. An unknown id is a config error.
    pub fn resolve(config: &FallbackConfig, catalog: &Catalog) -> Result<Self, GameGuruError> {
        let games = config
            .shortlist
            .iter()
            .map(|id| {
                catalog.find_by_id(id).ok_or_else(|| {
                    GameGuruError::Config(format!(
                        "fallback.shortlist names game id `{id}`, which is not in the catalog"
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            message: config.message.clone(),
            games,
        })
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn games(&self) -> &[Arc<GameRecord>] {
        &self.games
    }

    /// A fresh fallback log entry.
    pub fn to_message(&self) -> ConversationMessage {
        ConversationMessage::fallback(self.message.clone(), self.games.clone())
    }
}
