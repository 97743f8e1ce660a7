// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for reply name matching against the embedded catalog.

use std::sync::{Arc, LazyLock};

use gameguru_catalog::{Catalog, NameMatcher};
use proptest::prelude::*;

static MATCHER: LazyLock<NameMatcher> = LazyLock::new(|| {
    NameMatcher::new(Arc::new(Catalog::builtin().expect("dataset"))).expect("patterns")
});

fn catalog_names() -> Vec<String> {
    MATCHER.catalog().names().map(str::to_string).collect()
}

fn position(id: &str) -> usize {
    MATCHER
        .catalog()
        .all_games()
        .iter()
        .position(|g| g.id == id)
        .expect("id from catalog")
}

/// Text built from filler words and catalog names in arbitrary order and case.
fn reply_text() -> impl Strategy<Value = String> {
    let names = catalog_names();
    let piece = prop_oneof![
        prop::sample::select(names.clone()),
        prop::sample::select(names).prop_map(|n| n.to_uppercase()),
        "[a-z]{1,8}",
        Just(", ".to_string()),
    ];
    prop::collection::vec(piece, 0..20).prop_map(|parts| parts.join(" "))
}

proptest! {
    #[test]
    fn output_is_deterministic(text in reply_text()) {
        let first: Vec<String> = MATCHER.find_mentioned_games(&text).iter().map(|g| g.id.clone()).collect();
        let second: Vec<String> = MATCHER.find_mentioned_games(&text).iter().map(|g| g.id.clone()).collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn output_is_in_catalog_order_without_duplicates(text in reply_text()) {
        let positions: Vec<usize> = MATCHER
            .find_mentioned_games(&text)
            .iter()
            .map(|g| position(&g.id))
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn every_result_name_occurs_in_text(text in reply_text()) {
        let lower = text.to_lowercase();
        for game in MATCHER.find_mentioned_games(&text) {
            prop_assert!(lower.contains(&game.name.to_lowercase()));
        }
    }

    #[test]
    fn a_lone_name_is_always_found(index in 0usize..40) {
        let game = Arc::clone(&MATCHER.catalog().all_games()[index]);
        let text = format!("You should try {} tonight", game.name);
        let found = MATCHER.find_mentioned_games(&text);
        prop_assert!(found.iter().any(|g| g.id == game.id));
    }
}

#[test]
fn mention_order_does_not_change_output() {
    let forward = MATCHER.find_mentioned_games("Azul, Catan and Codenames");
    let backward = MATCHER.find_mentioned_games("Codenames and Catan, Azul");
    let ids = |v: &[Arc<gameguru_core::GameRecord>]| v.iter().map(|g| g.id.clone()).collect::<Vec<_>>();
    assert_eq!(ids(&forward), ids(&backward));
    assert_eq!(ids(&forward), vec!["1", "5", "24"]);
}

#[test]
fn matching_ignores_case() {
    let found = MATCHER.find_mentioned_games("have you played ticket to ride or TERRAFORMING MARS?");
    let names: Vec<&str> = found.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Ticket to Ride", "Terraforming Mars"]);
}
