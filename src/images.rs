//! Card image resolution
//!
//! Turns a deck-list card name into something displayable. Basic energy is
//! served from local images without touching the network; every other card
//! is looked up in the card database. Resolution never fails: any problem
//! degrades that one card to a placeholder.

use crate::config::Config;
use crate::loader::database_async::{CardData, CardSource};
use crate::loader::identifier::extract_set_id_and_card_id;
use crate::{HandError, Result};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error};

/// Energy symbols with a bundled image, and the image's type name
const ENERGY_TYPES: &[(char, &str)] = &[
    ('W', "Water"),
    ('P', "Psychic"),
    ('M', "Metal"),
    ('L', "Lightning"),
    ('R', "Fire"),
    ('G', "Grass"),
    ('F', "Fighting"),
    ('D', "Dark"),
];

/// Find the energy symbol of a "Basic {X} Energy" card
///
/// The pattern may appear anywhere in the name, so "4 Basic {G} Energy SVE 1"
/// style names from newer exports still match.
pub fn energy_symbol(card_name: &str) -> Option<char> {
    const OPEN: &str = "Basic {";
    const CLOSE: &str = "} Energy";

    card_name.match_indices(OPEN).find_map(|(idx, _)| {
        let rest = &card_name[idx + OPEN.len()..];
        let mut chars = rest.chars();
        let symbol = chars.next()?;
        let is_word = symbol.is_ascii_alphanumeric() || symbol == '_';
        (is_word && chars.as_str().starts_with(CLOSE)).then_some(symbol)
    })
}

/// Read-only mapping from energy tokens ("{W}") to local image paths
#[derive(Debug, Clone)]
pub struct EnergyImageTable {
    images: FxHashMap<String, String>,
}

impl EnergyImageTable {
    /// Build the table from the images in `config.energy_image_dir`
    pub fn new(config: &Config) -> Self {
        let images = ENERGY_TYPES
            .iter()
            .map(|(symbol, type_name)| {
                let path = config
                    .energy_image_dir
                    .join(format!("basic{type_name}Energy.jpg"));
                (
                    format!("{{{symbol}}}"),
                    path.to_string_lossy().into_owned(),
                )
            })
            .collect();
        EnergyImageTable { images }
    }

    /// Look up an energy token such as "{W}"
    pub fn get(&self, token: &str) -> Option<&str> {
        self.images.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// A displayable image reference; never empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "uri", rename_all = "snake_case")]
pub enum CardImage {
    /// Local basic energy image
    Energy(String),
    /// Card image served by the database
    Remote(String),
    /// Fallback image for a card that could not be resolved
    Placeholder(String),
}

impl CardImage {
    pub fn as_str(&self) -> &str {
        match self {
            CardImage::Energy(uri) | CardImage::Remote(uri) | CardImage::Placeholder(uri) => uri,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, CardImage::Placeholder(_))
    }
}

impl fmt::Display for CardImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of resolving one card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCard {
    pub image: CardImage,
    /// Whether the database reported a Basic Pokémon
    pub basic_creature: bool,
}

/// Resolves card names to images
///
/// Cheap to clone; clones share the card source and its cache.
pub struct CardImageResolver<S> {
    source: Arc<S>,
    config: Arc<Config>,
    energy: Arc<EnergyImageTable>,
}

impl<S> Clone for CardImageResolver<S> {
    fn clone(&self) -> Self {
        CardImageResolver {
            source: Arc::clone(&self.source),
            config: Arc::clone(&self.config),
            energy: Arc::clone(&self.energy),
        }
    }
}

impl<S: CardSource> CardImageResolver<S> {
    pub fn new(source: Arc<S>, config: Arc<Config>) -> Self {
        let energy = Arc::new(EnergyImageTable::new(&config));
        CardImageResolver {
            source,
            config,
            energy,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    /// Resolve one card name to an image
    pub async fn resolve(&self, card_name: &str) -> ResolvedCard {
        if let Some(symbol) = energy_symbol(card_name) {
            let token = format!("{{{symbol}}}");
            debug!(card = card_name, "energy card detected: {token}");
            let image = match self.energy.get(&token) {
                Some(path) => CardImage::Energy(path.to_string()),
                None => CardImage::Placeholder(self.config.default_energy_image.clone()),
            };
            return ResolvedCard {
                image,
                basic_creature: false,
            };
        }

        match self.lookup(card_name).await {
            Ok(card) => {
                debug!(card = card_name, name = %card.name, "fetched card data");
                ResolvedCard {
                    image: self.card_image(&card),
                    basic_creature: card.is_basic_creature(),
                }
            }
            Err(e) => {
                error!(card = card_name, "error fetching card data: {e}");
                ResolvedCard {
                    image: CardImage::Placeholder(self.config.default_card_image.clone()),
                    basic_creature: false,
                }
            }
        }
    }

    async fn lookup(&self, card_name: &str) -> Result<Arc<CardData>> {
        let id = extract_set_id_and_card_id(card_name);
        if !id.is_resolved() {
            return Err(HandError::UnresolvedIdentifier(card_name.to_string()));
        }

        let key = id.lookup_key();
        match self.config.lookup_timeout() {
            Some(limit) => tokio::time::timeout(limit, self.source.fetch_card(&key))
                .await
                .map_err(|_| HandError::LookupTimeout(self.config.lookup_timeout_ms))?,
            None => self.source.fetch_card(&key).await,
        }
    }

    fn card_image(&self, card: &CardData) -> CardImage {
        match card.image.as_deref() {
            Some(base) if !base.is_empty() => CardImage::Remote(self.config.image_url(base)),
            _ => CardImage::Placeholder(self.config.default_card_image.clone()),
        }
    }
}
