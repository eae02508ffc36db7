//! Deck list loader (Pokémon TCG Live / PTCGO export format)
//!
//! ```text
//! Pokémon: 12
//! 4 Pikachu SVI 70
//! Trainer: 36
//! 4 Professor's Research SVI 189
//! Energy: 12
//! 12 Basic {L} Energy
//! Total Cards: 60
//! ```

use crate::Result;
use deunicode::deunicode;
use std::fs;
use std::path::Path;

/// Section headers and footers that never name a card
const HEADER_PREFIXES: &[&str] = &["Pokemon:", "Trainer:", "Energy:", "Total Cards:"];

/// Deck loader for exported deck lists
pub struct DeckLoader;

impl DeckLoader {
    /// Load a deck list from a text file
    pub fn load_from_file(path: &Path) -> Result<DeckList> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Parse a deck list from its text content
    ///
    /// Never fails: a line that is not `<quantity> <name>` is kept verbatim as
    /// a single card name and left to fail later during image resolution.
    pub fn parse(content: &str) -> DeckList {
        let mut cards = Vec::new();

        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || is_header(line) {
                continue;
            }

            match split_quantity(line) {
                Some((count, card_name)) => {
                    cards.extend(std::iter::repeat(card_name.to_string()).take(count.into()));
                }
                None => cards.push(line.to_string()),
            }
        }

        DeckList { cards }
    }
}

/// "Pokémon: 12" and "Pokemon: 12" are both headers
fn is_header(line: &str) -> bool {
    // Only the first few characters matter; avoid transliterating whole card names
    let prefix: String = line.chars().take(12).collect();
    let folded = deunicode(&prefix);
    HEADER_PREFIXES.iter().any(|p| folded.starts_with(p))
}

/// Split "4 Pikachu SVI 70" into (4, "Pikachu SVI 70")
///
/// A count that does not fit in a `u8` is not a quantity; the line is kept whole.
fn split_quantity(line: &str) -> Option<(u8, &str)> {
    let split_at = line.find(char::is_whitespace)?;
    let (count_str, rest) = line.split_at(split_at);

    if !count_str.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let count = count_str.parse::<u8>().ok()?;

    let card_name = rest.trim_start();
    if card_name.is_empty() {
        return None;
    }

    Some((count, card_name))
}

/// A distinct card and how many copies the deck holds
///
/// Grouped view for display; the deck itself keeps one name per copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckCount {
    pub card_name: String,
    pub count: usize,
}

/// Parsed deck: one element per physical card, duplicates retained
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckList {
    pub cards: Vec<String>,
}

impl DeckList {
    /// Total cards in the deck
    pub fn total_cards(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Distinct cards with their counts, in order of first appearance
    pub fn counts(&self) -> Vec<DeckCount> {
        let mut counts: Vec<DeckCount> = Vec::new();
        for name in &self.cards {
            match counts.iter_mut().find(|c| &c.card_name == name) {
                Some(count) => count.count += 1,
                None => counts.push(DeckCount {
                    card_name: name.clone(),
                    count: 1,
                }),
            }
        }
        counts
    }
}
