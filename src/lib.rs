//! Pokémon TCG test hand generator
//!
//! Parses exported deck lists and draws random opening hands that satisfy
//! the mulligan rule (at least one Basic Pokémon), resolving every card to an
//! image through the TCGdex card database.

pub mod config;
pub mod error;
pub mod images;
pub mod loader;
pub mod sampler;
pub mod session;

#[cfg(test)]
mod test_support;

pub use config::{Config, HAND_SIZE};
pub use error::{HandError, Result};
pub use images::{CardImage, CardImageResolver};
pub use sampler::{HandAttempt, HandSampler};
pub use session::{DeckInput, Session};
