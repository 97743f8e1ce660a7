// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board-game catalog for GameGuru.
//!
//! The [`Catalog`] holds the immutable game dataset embedded at build time and
//! answers id, name, search and filter queries. The [`NameMatcher`] scans
//! assistant replies for exact game names so recommendations can be attached
//! to chat messages.

pub mod matcher;
pub mod search;
pub mod store;

use gameguru_core::GameGuruError;
use thiserror::Error;

pub use matcher::NameMatcher;
pub use search::GameFilter;
pub use store::Catalog;

/// Errors raised while loading or indexing a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The dataset is not valid JSON or does not match the record shape.
    #[error("malformed dataset: {0}")]
    Dataset(#[from] serde_json::Error),

    #[error("duplicate game id `{0}`")]
    DuplicateId(String),

    /// Two names collide after case-folding.
    #[error("duplicate game name `{0}`")]
    DuplicateName(String),

    #[error("game `{id}` has an empty name")]
    EmptyName { id: String },

    #[error("game `{id}` has {field} {value}, expected 1-5")]
    OutOfRange {
        id: String,
        field: &'static str,
        value: u8,
    },

    /// A name pattern failed to compile.
    #[error("cannot build name pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl From<CatalogError> for GameGuruError {
    fn from(err: CatalogError) -> Self {
        GameGuruError::Catalog(err.to_string())
    }
}
