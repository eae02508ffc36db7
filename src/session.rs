//! Test hand session
//!
//! Holds the hands accepted so far and exposes the two user operations:
//! submit a deck list (draw one more hand) and clear the session.

use crate::config::{Config, HAND_SIZE};
use crate::images::CardImageResolver;
use crate::loader::database_async::{CardSource, TcgdexClient};
use crate::loader::deck::{DeckList, DeckLoader};
use crate::loader::deck_async::prefetch_deck_cards;
use crate::sampler::{HandAttempt, HandSampler};
use crate::{HandError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

/// Raw deck list as entered or uploaded by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckInput {
    pub deck: String,
}

impl DeckInput {
    pub fn new(deck: impl Into<String>) -> Self {
        DeckInput { deck: deck.into() }
    }
}

/// Accepted hands, append-only until cleared
#[derive(Debug, Default)]
struct SessionState {
    hands: Vec<HandAttempt>,
    /// Bumped by every clear; hands drawn under an older epoch are dropped
    epoch: u64,
}

/// A user session drawing test hands
pub struct Session<S> {
    /// One draw in flight at a time
    sampler: Mutex<HandSampler<S>>,
    state: RwLock<SessionState>,
    max_attempts: Option<usize>,
}

impl Session<TcgdexClient> {
    /// Create a session backed by the TCGdex API
    pub fn from_config(config: Config, seed: Option<u64>) -> Result<Self> {
        let config = Arc::new(config);
        let client = Arc::new(TcgdexClient::new(Arc::clone(&config))?);
        let max_attempts = config.max_attempts;
        let resolver = CardImageResolver::new(client, config);
        let sampler = match seed {
            Some(seed) => HandSampler::with_seed(resolver, seed),
            None => HandSampler::new(resolver),
        };
        Ok(Session::new(sampler, max_attempts))
    }
}

impl<S: CardSource> Session<S> {
    /// `max_attempts` of `None` draws until a legal hand appears
    pub fn new(sampler: HandSampler<S>, max_attempts: Option<usize>) -> Self {
        Session {
            sampler: Mutex::new(sampler),
            state: RwLock::new(SessionState::default()),
            max_attempts,
        }
    }

    /// Parse a deck input into its card multiset
    pub fn parse(input: &DeckInput) -> DeckList {
        DeckLoader::parse(&input.deck)
    }

    /// Draw one legal hand from a deck list and record it
    ///
    /// Fails with [`HandError::DeckTooSmall`] before drawing anything if the
    /// deck has fewer than 7 cards. If the session is cleared while the hand
    /// is being drawn, the hand is still returned but not recorded.
    pub async fn submit_deck(&self, input: &DeckInput) -> Result<HandAttempt> {
        let deck = Self::parse(input);
        if deck.total_cards() < HAND_SIZE {
            return Err(HandError::DeckTooSmall {
                found: deck.total_cards(),
            });
        }

        let epoch = self.state.read().await.epoch;

        let hand = {
            let mut sampler = self.sampler.lock().await;
            match self.max_attempts {
                Some(max) => sampler.sample_bounded(&deck, max).await?,
                None => sampler.sample_until_legal(&deck).await?,
            }
        };

        let mut state = self.state.write().await;
        if state.epoch == epoch {
            state.hands.push(hand.clone());
        } else {
            info!("session cleared while drawing; hand not recorded");
        }
        Ok(hand)
    }

    /// Warm the card cache with every distinct card of a deck
    /// Returns (cards_loaded, duration)
    pub async fn prefetch(&self, input: &DeckInput) -> Result<(usize, Duration)> {
        let deck = Self::parse(input);
        let sampler = self.sampler.lock().await;
        prefetch_deck_cards(sampler.resolver().source(), &deck).await
    }

    /// Remove every recorded hand
    pub async fn clear_session(&self) {
        let mut state = self.state.write().await;
        state.hands.clear();
        state.epoch += 1;
    }

    /// Recorded hands, oldest first
    pub async fn hands(&self) -> Vec<HandAttempt> {
        self.state.read().await.hands.clone()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.hands.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.hands.is_empty()
    }
}
