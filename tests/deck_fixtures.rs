//! Deck fixture tests
//!
//! Tests are automatically generated for each `.txt` deck list in the
//! `test_decks/` directory using the `dir-test` procedural macro.

use dir_test::{dir_test, Fixture};
use pkmn_test_hand::images::energy_symbol;
use pkmn_test_hand::loader::{extract_set_id_and_card_id, DeckLoader};
use pkmn_test_hand::HAND_SIZE;
use similar_asserts::assert_eq;

/// Card count announced by the "Total Cards: N" footer
fn declared_total(content: &str) -> Option<usize> {
    content
        .lines()
        .find_map(|line| line.trim().strip_prefix("Total Cards:"))
        .and_then(|n| n.trim().parse().ok())
}

/// Parsed card count matches the export's own footer
#[dir_test(
    dir: "$CARGO_MANIFEST_DIR/test_decks",
    glob: "**/*.txt",
)]
fn test_deck_parses_to_declared_total(fixture: Fixture<&str>) {
    let deck = DeckLoader::parse(fixture.content());

    let expected = declared_total(fixture.content())
        .unwrap_or_else(|| panic!("{} has no Total Cards footer", fixture.path()));
    assert_eq!(deck.total_cards(), expected, "deck {}", fixture.path());
    assert!(deck.total_cards() >= HAND_SIZE);

    for card in &deck.cards {
        assert!(!card.ends_with(':') && !card.contains(": "), "header leaked: {card}");
    }
}

/// Every card is either basic energy or resolves to a database key
#[dir_test(
    dir: "$CARGO_MANIFEST_DIR/test_decks",
    glob: "**/*.txt",
)]
fn test_deck_cards_resolve(fixture: Fixture<&str>) {
    let deck = DeckLoader::parse(fixture.content());

    let counts = deck.counts();
    let unresolved: Vec<&str> = counts
        .iter()
        .map(|count| count.card_name.as_str())
        .filter(|name| energy_symbol(name).is_none())
        .filter(|name| !extract_set_id_and_card_id(name).is_resolved())
        .collect();

    assert_eq!(unresolved, Vec::<&str>::new(), "deck {}", fixture.path());
}

#[test]
fn test_padding_in_fixture_deck() {
    let content = include_str!("../test_decks/charizard_pidgeot.txt");
    let deck = DeckLoader::parse(content);

    let keys: Vec<String> = deck
        .counts()
        .iter()
        .filter(|e| energy_symbol(&e.card_name).is_none())
        .map(|e| extract_set_id_and_card_id(&e.card_name).lookup_key())
        .collect();

    assert!(keys.contains(&"sv03.5-004".to_string()));
    assert!(keys.contains(&"swsh12.5-020".to_string()));
    assert!(keys.contains(&"swsh9-041".to_string()));
    assert!(keys.contains(&"swsh8-225".to_string()));
    assert!(keys.contains(&"swsh11-058".to_string()));
}
