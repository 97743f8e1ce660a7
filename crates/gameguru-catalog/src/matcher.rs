// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Finds catalog games mentioned by name in free text.
//!
//! Each display name becomes one escaped, case-insensitive pattern anchored on
//! word boundaries. A [`RegexSet`] picks the candidate games in one pass; its
//! indices come back ascending, so results follow catalog order and each game
//! appears at most once. A mention that lies entirely inside a longer name's
//! mention ("Love" inside "Love Letter") does not count.

use std::ops::Range;
use std::sync::Arc;

use gameguru_core::GameRecord;
use regex::{Regex, RegexBuilder, RegexSet, RegexSetBuilder};
use tracing::trace;

use crate::store::Catalog;
use crate::CatalogError;

/// Compiled name patterns for one catalog.
#[derive(Debug)]
pub struct NameMatcher {
    catalog: Arc<Catalog>,
    candidates: RegexSet,
    patterns: Vec<Regex>,
}

impl NameMatcher {
    /// Compiles one pattern per game. Done once; reused for every reply.
    pub fn new(catalog: Arc<Catalog>) -> Result<Self, CatalogError> {
        let sources: Vec<String> = catalog.names().map(name_pattern).collect();
        let candidates = RegexSetBuilder::new(&sources)
            .case_insensitive(true)
            .build()?;
        let patterns = sources
            .iter()
            .map(|p| RegexBuilder::new(p).case_insensitive(true).build())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            catalog,
            candidates,
            patterns,
        })
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Games whose full name occurs in `text` as whole words, in catalog order.
    pub fn find_mentioned_games(&self, text: &str) -> Vec<Arc<GameRecord>> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        let hits: Vec<(usize, Vec<Range<usize>>)> = self
            .candidates
            .matches(text)
            .into_iter()
            .map(|i| {
                let spans = self.patterns[i].find_iter(text).map(|m| m.range()).collect();
                (i, spans)
            })
            .collect();

        let games = self.catalog.all_games();
        let found: Vec<Arc<GameRecord>> = hits
            .iter()
            .filter(|(i, spans)| {
                spans
                    .iter()
                    .any(|span| !shadowed(span, hits.iter().filter(|(j, _)| j != i)))
            })
            .map(|(i, _)| Arc::clone(&games[*i]))
            .collect();
        trace!(mentioned = found.len(), "matched game names");
        found
    }
}

/// True when `span` sits inside a strictly longer match of another game.
fn shadowed<'a>(
    span: &Range<usize>,
    mut others: impl Iterator<Item = &'a (usize, Vec<Range<usize>>)>,
) -> bool {
    others.any(|(_, spans)| {
        spans.iter().any(|outer| {
            outer.start <= span.start && span.end <= outer.end && outer.len() > span.len()
        })
    })
}

/// `\b` is only meaningful next to a word character, so it is added on each
/// side of the name whose edge character is one.
fn name_pattern(name: &str) -> String {
    let mut pattern = String::with_capacity(name.len() + 8);
    if name.chars().next().is_some_and(is_word_char) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(name));
    if name.chars().next_back().is_some_and(is_word_char) {
        pattern.push_str(r"\b");
    }
    pattern
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
