//! Deck list parsing and card lookup
//!
//! Parsers for exported deck lists and the identifiers used to find each
//! card in the remote database

pub mod database_async;
pub mod deck;
pub mod deck_async;
pub mod identifier;
pub mod set_codes;

pub use database_async::{CardData, CardSource, TcgdexClient};
pub use deck::{DeckCount, DeckList, DeckLoader};
pub use identifier::{extract_set_id_and_card_id, CardIdentifier};
pub use set_codes::{needs_three_digit_padding, SetCodeTable};
