// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Free-text search and structured filtering over the catalog.

use std::sync::Arc;

use gameguru_core::GameRecord;
use serde::Deserialize;

use crate::store::Catalog;

/// Structured catalog filter. Unset criteria match every game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GameFilter {
    /// Group size the game must support.
    pub players: Option<u32>,
    /// Upper bound on difficulty, inclusive.
    pub max_difficulty: Option<u8>,
    /// Upper bound on learning curve, inclusive.
    pub max_learning_curve: Option<u8>,
    /// Game must carry at least one of these tags (case-insensitive).
    #[serde(default)]
    pub categories: Vec<String>,
}

impl GameFilter {
    pub fn matches(&self, game: &GameRecord) -> bool {
        if let Some(n) = self.players
            && !game.supports_players(n)
        {
            return false;
        }
        if self.max_difficulty.is_some_and(|d| game.difficulty > d) {
            return false;
        }
        if self
            .max_learning_curve
            .is_some_and(|c| game.learning_curve > c)
        {
            return false;
        }
        self.categories.is_empty()
            || game.categories.iter().any(|tag| {
                self.categories
                    .iter()
                    .any(|wanted| wanted.eq_ignore_ascii_case(tag))
            })
    }
}

impl Catalog {
    /// Case-insensitive substring search over name, description and categories.
    ///
    /// A blank term returns every game.
    pub fn search(&self, term: &str) -> Vec<Arc<GameRecord>> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.all_games().to_vec();
        }
        self.all_games()
            .iter()
            .filter(|g| {
                g.name.to_lowercase().contains(&needle)
                    || g.description.to_lowercase().contains(&needle)
                    || g.categories
                        .iter()
                        .any(|c| c.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect()
    }

    /// Games satisfying every set criterion of `filter`, in catalog order.
    pub fn filter(&self, filter: &GameFilter) -> Vec<Arc<GameRecord>> {
        self.all_games()
            .iter()
            .filter(|g| filter.matches(g))
            .cloned()
            .collect()
    }
}
