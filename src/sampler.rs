//! Opening hand sampling
//!
//! Draws random 7-card hands from a deck until one satisfies the opening-hand
//! rule: at least one Basic Pokémon. Each candidate hand is resolved in
//! parallel, one task per card, and the hand is only published once every
//! card has an image.
//!
//! A deck with no Basic Pokémon never yields a legal hand, so
//! [`HandSampler::sample_until_legal`] loops forever on it. Real decks always
//! contain one; use [`HandSampler::sample_bounded`] when the input is untrusted.

use crate::config::HAND_SIZE;
use crate::images::{CardImage, CardImageResolver, ResolvedCard};
use crate::loader::database_async::CardSource;
use crate::loader::deck::DeckList;
use crate::{HandError, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::Serialize;
use smallvec::SmallVec;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

/// An accepted opening hand
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandAttempt {
    /// Card names in draw order
    pub cards: SmallVec<[String; HAND_SIZE]>,
    /// Image of each card, index-aligned with `cards`
    pub images: SmallVec<[CardImage; HAND_SIZE]>,
    /// Number of hands drawn before this one was accepted (including itself)
    pub attempts: usize,
}

/// Draws hands from a deck and resolves their images
pub struct HandSampler<S> {
    resolver: CardImageResolver<S>,
    rng: ChaCha12Rng,
}

impl<S: CardSource> HandSampler<S> {
    /// Create a sampler seeded from OS entropy
    pub fn new(resolver: CardImageResolver<S>) -> Self {
        HandSampler {
            resolver,
            rng: ChaCha12Rng::from_entropy(),
        }
    }

    /// Create a sampler with a fixed seed (for reproducible draws)
    pub fn with_seed(resolver: CardImageResolver<S>, seed: u64) -> Self {
        HandSampler {
            resolver,
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }

    pub fn resolver(&self) -> &CardImageResolver<S> {
        &self.resolver
    }

    /// Draw hands until one contains a Basic Pokémon
    ///
    /// Never returns if the deck has no Basic Pokémon.
    pub async fn sample_until_legal(&mut self, deck: &DeckList) -> Result<HandAttempt> {
        self.sample(deck, None).await
    }

    /// Draw at most `max_attempts` hands, failing with
    /// [`HandError::NoLegalHand`] if none contains a Basic Pokémon
    pub async fn sample_bounded(
        &mut self,
        deck: &DeckList,
        max_attempts: usize,
    ) -> Result<HandAttempt> {
        self.sample(deck, Some(max_attempts)).await
    }

    async fn sample(
        &mut self,
        deck: &DeckList,
        max_attempts: Option<usize>,
    ) -> Result<HandAttempt> {
        if deck.total_cards() < HAND_SIZE {
            return Err(HandError::DeckTooSmall {
                found: deck.total_cards(),
            });
        }

        let mut attempts = 0;
        loop {
            if max_attempts.is_some_and(|max| attempts >= max) {
                return Err(HandError::NoLegalHand { attempts });
            }
            attempts += 1;

            let cards = self.draw_candidate(deck);
            let resolved = self.resolve_hand(&cards).await;

            if resolved.iter().any(|card| card.basic_creature) {
                info!(attempts, "accepted hand: {}", cards.join(", "));
                let images = resolved.into_iter().map(|card| card.image).collect();
                return Ok(HandAttempt {
                    cards,
                    images,
                    attempts,
                });
            }

            debug!(attempt = attempts, "no Basic Pokémon in hand, redrawing");
        }
    }

    /// Pick 7 distinct deck positions by shuffling and taking the first 7
    ///
    /// The deck is never mutated, so every draw samples from the full deck.
    pub fn draw_candidate(&mut self, deck: &DeckList) -> SmallVec<[String; HAND_SIZE]> {
        let mut order: Vec<usize> = (0..deck.cards.len()).collect();
        let (hand, _) = order.partial_shuffle(&mut self.rng, HAND_SIZE);
        hand.iter().map(|&idx| deck.cards[idx].clone()).collect()
    }

    /// Resolve every card of a hand concurrently
    ///
    /// All lookups start together. Each result is stored at its card's
    /// position, so the output is index-aligned with `cards` whatever order
    /// they finish in. Dropping the returned future aborts the lookups.
    pub async fn resolve_hand(&self, cards: &[String]) -> SmallVec<[ResolvedCard; HAND_SIZE]> {
        let mut tasks = JoinSet::new();
        for (idx, name) in cards.iter().enumerate() {
            let resolver = self.resolver.clone();
            let name = name.clone();
            tasks.spawn(async move { (idx, resolver.resolve(&name).await) });
        }

        let mut slots: SmallVec<[Option<ResolvedCard>; HAND_SIZE]> =
            cards.iter().map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((idx, card)) => slots[idx] = Some(card),
                Err(e) => error!("resolution task failed: {e}"),
            }
        }

        let fallback = &self.resolver.config().default_card_image;
        slots
            .into_iter()
            .map(|slot| {
                slot.unwrap_or_else(|| ResolvedCard {
                    image: CardImage::Placeholder(fallback.clone()),
                    basic_creature: false,
                })
            })
            .collect()
    }
}
