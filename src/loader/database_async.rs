//! Async card database client
//!
//! Looks cards up by "<set id>-<number>" key against the TCGdex REST API and
//! caches successful lookups, so a card drawn in several attempts is only
//! fetched once. Concurrent lookups of the same key share one request.

use crate::config::Config;
use crate::{HandError, Result};
use deunicode::deunicode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{OnceCell, RwLock};
use tracing::debug;

/// Card metadata returned by the database
///
/// Only the fields needed to pick an image and evaluate the opening-hand
/// rule are kept; everything else in the payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardData {
    pub name: String,
    /// "Pokemon", "Trainer" or "Energy"
    #[serde(default)]
    pub category: String,
    /// Evolution stage, present for Pokémon ("Basic", "Stage1", ...)
    #[serde(default)]
    pub stage: Option<String>,
    /// Image base URL, without quality or extension
    #[serde(default)]
    pub image: Option<String>,
}

impl CardData {
    /// True for a Basic Pokémon, the card an opening hand must contain
    pub fn is_basic_creature(&self) -> bool {
        deunicode(&self.category).eq_ignore_ascii_case("pokemon")
            && self.stage.as_deref() == Some("Basic")
    }
}

/// Source of card metadata
pub trait CardSource: Send + Sync + 'static {
    /// Fetch a card by lookup key ("sv01-070")
    fn fetch_card(&self, key: &str) -> impl Future<Output = Result<Arc<CardData>>> + Send;
}

/// Cache slot for one lookup key; empty until a lookup succeeds
type CardCell = Arc<OnceCell<Arc<CardData>>>;

/// TCGdex client with a shared lookup cache
#[derive(Clone)]
pub struct TcgdexClient {
    http: reqwest::Client,
    config: Arc<Config>,
    /// Cache of fetched cards keyed by lookup key (shared between clones)
    cards: Arc<RwLock<HashMap<String, CardCell>>>,
}

impl TcgdexClient {
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let mut builder =
            reqwest::Client::builder().user_agent(concat!("testhand/", env!("CARGO_PKG_VERSION")));
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build()?;

        Ok(TcgdexClient {
            http,
            config,
            cards: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    async fn fetch_remote(&self, key: &str) -> Result<CardData> {
        let url = self.config.card_url(key);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HandError::RemoteLookup(format!("{url} returned {status}")));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Get or create the cache slot for a key
    async fn cell(&self, key: &str) -> CardCell {
        {
            let cards = self.cards.read().await;
            if let Some(cell) = cards.get(key) {
                return Arc::clone(cell);
            }
        }

        let mut cards = self.cards.write().await;
        Arc::clone(cards.entry(key.to_string()).or_default())
    }

    /// Check if a card is already cached
    pub async fn contains(&self, key: &str) -> bool {
        self.cards
            .read()
            .await
            .get(key)
            .is_some_and(|cell| cell.initialized())
    }

    /// Number of cached cards
    pub async fn len(&self) -> usize {
        let cards = self.cards.read().await;
        cards.values().filter(|cell| cell.initialized()).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl CardSource for TcgdexClient {
    async fn fetch_card(&self, key: &str) -> Result<Arc<CardData>> {
        let cell = self.cell(key).await;

        // Callers racing on the same key wait for the first request. Failures
        // leave the slot empty; the next caller sends a new request.
        let card = cell
            .get_or_try_init(|| async {
                let card = self.fetch_remote(key).await?;
                debug!(key, name = %card.name, "fetched card data");
                Ok::<_, HandError>(Arc::new(card))
            })
            .await?;

        Ok(Arc::clone(card))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_pokemon() {
        let json = r#"{
            "category": "Pokemon",
            "id": "sv01-070",
            "image": "https://assets.tcgdex.net/en/sv/sv01/070",
            "localId": "070",
            "name": "Pikachu",
            "hp": 60,
            "stage": "Basic",
            "types": ["Lightning"]
        }"#;

        let card: CardData = serde_json::from_str(json).unwrap();
        assert_eq!(card.name, "Pikachu");
        assert_eq!(
            card.image.as_deref(),
            Some("https://assets.tcgdex.net/en/sv/sv01/070")
        );
        assert!(card.is_basic_creature());
    }

    #[test]
    fn test_deserialize_trainer_without_image() {
        let json = r#"{"category": "Trainer", "name": "Nest Ball", "image": null}"#;
        let card: CardData = serde_json::from_str(json).unwrap();
        assert_eq!(card.stage, None);
        assert_eq!(card.image, None);
        assert!(!card.is_basic_creature());
    }

    #[test]
    fn test_basic_creature_rule() {
        let mut card = CardData {
            name: "Raichu".to_string(),
            category: "Pokemon".to_string(),
            stage: Some("Stage1".to_string()),
            image: None,
        };
        assert!(!card.is_basic_creature());

        card.stage = Some("Basic".to_string());
        card.category = "Pokémon".to_string();
        assert!(card.is_basic_creature());

        card.category = "Energy".to_string();
        assert!(!card.is_basic_creature());
    }

    #[test]
    fn test_missing_name_is_malformed() {
        let result: std::result::Result<CardData, _> =
            serde_json::from_str(r#"{"category": "Pokemon", "stage": "Basic"}"#);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_client_starts_with_empty_cache() {
        let client = TcgdexClient::new(Arc::new(Config::default())).unwrap();
        assert!(client.is_empty().await);
        assert!(!client.contains("sv01-070").await);
        assert_eq!(client.len().await, 0);
    }
}
