//! Card identifier extraction
//!
//! Derives the database lookup key from a deck-list card name:
//! "Pikachu SVI 70" -> ("sv01", "070") -> "sv01-070"

use crate::loader::set_codes::{needs_three_digit_padding, SetCodeTable};
use crate::{HandError, Result};
use std::fmt;
use tracing::{error, warn};

/// A (set id, card number) pair; both empty when unresolved
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CardIdentifier {
    pub set_id: String,
    pub number: String,
}

impl CardIdentifier {
    pub fn new(set_id: impl Into<String>, number: impl Into<String>) -> Self {
        CardIdentifier {
            set_id: set_id.into(),
            number: number.into(),
        }
    }

    /// The ("", "") sentinel
    pub fn unresolved() -> Self {
        CardIdentifier::default()
    }

    pub fn is_resolved(&self) -> bool {
        !self.set_id.is_empty()
    }

    /// Database lookup key, "<set id>-<number>"
    pub fn lookup_key(&self) -> String {
        format!("{}-{}", self.set_id, self.number)
    }
}

impl fmt::Display for CardIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.set_id, self.number)
    }
}

/// Extract the identifier of a card, returning the unresolved sentinel on failure
///
/// Failures are logged and never propagated; the caller falls back to a
/// placeholder image.
pub fn extract_set_id_and_card_id(card_name: &str) -> CardIdentifier {
    try_extract(card_name, SetCodeTable::global()).unwrap_or_else(|e| {
        match &e {
            HandError::UnresolvedIdentifier(_) if card_name.split_whitespace().count() < 3 => {
                error!(card = card_name, "{e}");
            }
            _ => {
                warn!(card = card_name, "{e}");
            }
        }
        CardIdentifier::unresolved()
    })
}

/// Extract the identifier of a card against a specific set table
///
/// Expects `<name words...> <SETCODE> <NUMBER>`, whitespace delimited.
pub fn try_extract(card_name: &str, table: &SetCodeTable) -> Result<CardIdentifier> {
    let parts: Vec<&str> = card_name.split_whitespace().collect();

    if parts.len() < 3 {
        return Err(HandError::UnresolvedIdentifier(format!(
            "Unexpected format for card name \"{card_name}\""
        )));
    }

    let set_code = parts[parts.len() - 2];
    let raw_number = parts[parts.len() - 1];

    let set_id = table.resolve(set_code).ok_or_else(|| {
        HandError::UnresolvedIdentifier(format!(
            "Set code \"{set_code}\" not found in mapping for card \"{card_name}\""
        ))
    })?;

    let number = if needs_three_digit_padding(set_id) {
        format!("{raw_number:0>3}")
    } else {
        raw_number.to_string()
    };

    Ok(CardIdentifier::new(set_id, number))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_padded_set() {
        let id = extract_set_id_and_card_id("Pikachu SVI 70");
        assert_eq!(id, CardIdentifier::new("sv01", "070"));
        assert_eq!(id.lookup_key(), "sv01-070");

        let id = extract_set_id_and_card_id("Mew ex MEW 151");
        assert_eq!(id, CardIdentifier::new("sv03.5", "151"));

        let id = extract_set_id_and_card_id("Lost Vacuum LOR 5");
        assert_eq!(id, CardIdentifier::new("swsh11", "005"));
    }

    #[test]
    fn test_extract_unpadded_set() {
        let id = extract_set_id_and_card_id("Charizard SSH 250");
        assert_eq!(id, CardIdentifier::new("swsh1", "250"));

        let id = extract_set_id_and_card_id("Marnie SSH 9");
        assert_eq!(id, CardIdentifier::new("swsh1", "9"));

        let id = extract_set_id_and_card_id("Pikachu PR SWSH020");
        assert_eq!(id, CardIdentifier::new("swshp", "SWSH020"));
    }

    #[test]
    fn test_extract_unknown_set_code() {
        let id = extract_set_id_and_card_id("Mystery XXX 12");
        assert_eq!(id, CardIdentifier::unresolved());
        assert!(!id.is_resolved());
    }

    #[test]
    fn test_extract_too_few_tokens() {
        assert_eq!(extract_set_id_and_card_id("Pikachu"), CardIdentifier::unresolved());
        assert_eq!(extract_set_id_and_card_id("SVI 70"), CardIdentifier::unresolved());
        assert_eq!(extract_set_id_and_card_id(""), CardIdentifier::unresolved());
    }

    #[test]
    fn test_try_extract_reports_reason() {
        let table = SetCodeTable::new();
        let err = try_extract("Mystery XXX 12", &table).unwrap_err();
        assert!(err.to_string().contains("\"XXX\""));
        assert!(err.is_per_card());

        let err = try_extract("Pikachu", &table).unwrap_err();
        assert!(err.to_string().contains("Unexpected format"));
    }

    #[test]
    fn test_multi_word_names() {
        let id = extract_set_id_and_card_id("Professor's Research SVI 189");
        assert_eq!(id.lookup_key(), "sv01-189");

        // Extra spacing between tokens is tolerated
        let id = extract_set_id_and_card_id("Radiant  Charizard   CRZ 20");
        assert_eq!(id, CardIdentifier::new("swsh12.5", "020"));
    }
}
