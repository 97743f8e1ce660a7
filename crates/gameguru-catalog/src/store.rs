// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Immutable, validated game catalog.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use gameguru_core::GameRecord;
use tracing::debug;

use crate::CatalogError;

/// The dataset shipped with the binary.
const BUILTIN_DATASET: &str = include_str!("../data/games.json");

/// An ordered, read-only set of games.
///
/// Order is the dataset order and is preserved by every query.
#[derive(Debug)]
pub struct Catalog {
    games: Vec<Arc<GameRecord>>,
    by_id: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    /// Loads the embedded dataset.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_DATASET)
    }

    /// Parses a JSON array of game records.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<GameRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    /// Builds a catalog, checking that ids are unique, names are non-empty and
    /// unique ignoring case, and ordinals are within 1-5.
    pub fn from_records(records: Vec<GameRecord>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(records.len());
        let mut by_name = HashMap::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            if record.name.trim().is_empty() {
                return Err(CatalogError::EmptyName {
                    id: record.id.clone(),
                });
            }
            for (field, value) in [
                ("difficulty", record.difficulty),
                ("learning_curve", record.learning_curve),
            ] {
                if !(1..=5).contains(&value) {
                    return Err(CatalogError::OutOfRange {
                        id: record.id.clone(),
                        field,
                        value,
                    });
                }
            }
            if by_id.insert(record.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateId(record.id.clone()));
            }
            if by_name.insert(fold(&record.name), index).is_some() {
                return Err(CatalogError::DuplicateName(record.name.clone()));
            }
        }

        debug!(games = records.len(), "catalog loaded");
        Ok(Self {
            games: records.into_iter().map(Arc::new).collect(),
            by_id,
            by_name,
        })
    }

    /// Every game in catalog order.
    pub fn all_games(&self) -> &[Arc<GameRecord>] {
        &self.games
    }

    pub fn find_by_id(&self, id: &str) -> Option<Arc<GameRecord>> {
        self.by_id.get(id).map(|&i| Arc::clone(&self.games[i]))
    }

    /// Exact name lookup ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<Arc<GameRecord>> {
        self.by_name
            .get(&fold(name.trim()))
            .map(|&i| Arc::clone(&self.games[i]))
    }

    /// Sorted, deduplicated category tags across all games.
    pub fn categories(&self) -> Vec<String> {
        self.games
            .iter()
            .flat_map(|g| g.categories.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Display names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.games.iter().map(|g| g.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

fn fold(name: &str) -> String {
    name.to_lowercase()
}

#[cfg(test)]
pub(crate) fn record(id: &str, name: &str) -> GameRecord {
    GameRecord {
        id: id.into(),
        name: name.into(),
        players: "2-4".into(),
        play_time: "30 minutes".into(),
        difficulty: 2,
        learning_curve: 2,
        description: format!("{name} is a game."),
        categories: vec!["Family".into()],
        rating: 4.0,
        youtube_url: String::new(),
        manual_url: String::new(),
    }
}
